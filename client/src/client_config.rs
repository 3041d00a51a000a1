use meetup_shared::SyncConfig;

/// Contains Config properties which will be used by a Client
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    /// Tuning of the local mutation dispatcher
    pub sync: SyncConfig,
    /// Appended to every generated handle (`Box3-alice`). Clients that create objects
    /// concurrently need distinct namespaces, otherwise their handles can collide.
    pub handle_namespace: Option<String>,
}
