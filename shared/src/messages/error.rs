use thiserror::Error;

/// Errors that can occur while decoding a mutation received from the relay
///
/// Decoding never panics; the dispatcher drops the offending message and carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Message is not valid JSON, or a required field is missing or has the wrong shape
    #[error("Malformed mutation message: {reason}")]
    Malformed {
        reason: String,
    },

    /// Message was written by a newer protocol version than this client understands
    #[error("Unsupported mutation protocol version {version} (highest supported is {supported})")]
    UnsupportedVersion {
        version: u32,
        supported: u32,
    },
}

impl DecodeError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        DecodeError::Malformed {
            reason: reason.into(),
        }
    }
}

/// Errors that can occur while encoding a mutation for sending
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// JSON cannot carry NaN or infinite values
    #[error("Cannot encode {operation} for {handle}: vector component {index} is not finite")]
    NonFiniteVector {
        handle: String,
        operation: &'static str,
        index: usize,
    },

    /// Handles must be non-empty to be addressable
    #[error("Cannot encode {operation}: handle is empty")]
    EmptyHandle {
        operation: &'static str,
    },

    /// Serializer failure
    #[error("Failed to serialize mutation for {handle}: {reason}")]
    Serialization {
        handle: String,
        reason: String,
    },
}
