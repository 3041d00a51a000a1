use thiserror::Error;

/// Errors that can occur during object registry operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A record already exists for this handle
    #[error("Object {handle} already exists in the scene registry")]
    DuplicateHandle {
        handle: String,
    },

    /// No record exists for this handle
    #[error("Object {handle} not found in the scene registry")]
    UnknownHandle {
        handle: String,
    },
}
