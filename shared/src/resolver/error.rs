use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while turning an Add payload into a renderable
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Color or asset name could not be interpreted
    #[error("Invalid {kind} payload '{payload}': {reason}")]
    InvalidPayload {
        kind: &'static str,
        payload: String,
        reason: &'static str,
    },

    /// Asset source could not deliver the asset
    #[error("Failed to load asset '{asset}': {reason}")]
    LoadFailed {
        asset: String,
        reason: String,
    },

    /// Asset bytes were delivered but are not a usable model
    #[error("Failed to parse asset '{asset}': {reason}")]
    ParseFailed {
        asset: String,
        reason: String,
    },

    /// Asset did not arrive within the configured load timeout
    #[error("Asset '{asset}' did not load within {timeout:?}")]
    TimedOut {
        asset: String,
        timeout: Duration,
    },
}
