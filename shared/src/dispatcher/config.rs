use std::time::Duration;

/// What to do with an Add whose handle is already in the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DuplicateAddPolicy {
    /// Keep the existing object and report `DuplicateHandle`.
    #[default]
    Reject,
    /// Remove the existing object, then add the new one.
    Overwrite,
}

/// Tuning knobs of the mutation dispatcher.
#[derive(Clone, Debug, PartialEq)]
pub struct SyncConfig {
    /// How long a deferred mutation waits between attempts.
    pub retry_interval: Duration,
    /// How long a deferred mutation may wait for its target before it is abandoned
    /// with `TargetNeverResolved`. `None` retries forever.
    pub max_retry_window: Option<Duration>,
    /// How long an asset may take to load before it fails. `None` waits forever.
    pub asset_load_timeout: Option<Duration>,
    pub on_duplicate_add: DuplicateAddPolicy,
    /// Most events kept between two `take_events` calls; older ones are dropped first.
    pub event_capacity: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            retry_interval: Duration::from_millis(500),
            max_retry_window: Some(Duration::from_secs(60)),
            asset_load_timeout: Some(Duration::from_secs(30)),
            on_duplicate_add: DuplicateAddPolicy::Reject,
            event_capacity: 1024,
        }
    }
}
