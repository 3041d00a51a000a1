use std::time::Duration;

use thiserror::Error;

use crate::{DecodeError, EncodeError, TransportError};

/// Every way a single mutation can fail to take effect
///
/// None of these are fatal: the mutation concerned has no effect and processing
/// continues with the next one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// Received bytes were not a valid mutation
    #[error("Dropped undecodable message: {0}")]
    Decode(#[from] DecodeError),

    /// Outgoing mutation could not be encoded
    #[error("Mutation not sent: {0}")]
    Encode(#[from] EncodeError),

    /// Add for a handle that already has a record, under the Reject policy
    #[error("Add for {handle} rejected: handle already exists")]
    DuplicateHandle {
        handle: String,
    },

    /// Mutation for a handle with no record, not even a pending one
    #[error("Cannot {operation} {handle}: no such object")]
    UnknownHandle {
        handle: String,
        operation: &'static str,
    },

    /// Add payload could not be turned into a renderable
    #[error("Add for {handle} abandoned: {reason}")]
    InvalidPayload {
        handle: String,
        reason: String,
    },

    /// Asynchronous asset construction failed; the pending record was removed
    #[error("Add for {handle} abandoned: {reason}")]
    LoadFailure {
        handle: String,
        reason: String,
    },

    /// Deferred mutation gave up waiting for its target to finish loading
    #[error("Dropped {operation} for {handle}: target still loading after {waited:?}")]
    TargetNeverResolved {
        handle: String,
        operation: &'static str,
        waited: Duration,
    },

    /// Deferred mutation discarded because its target was removed first
    #[error("Dropped {operation} for {handle}: target was removed")]
    TargetRemoved {
        handle: String,
        operation: &'static str,
    },

    /// Message could not be handed to or taken from the relay
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

impl SyncError {
    /// Handle of the object concerned, when the error is about one.
    pub fn handle(&self) -> Option<&str> {
        match self {
            SyncError::DuplicateHandle { handle }
            | SyncError::UnknownHandle { handle, .. }
            | SyncError::InvalidPayload { handle, .. }
            | SyncError::LoadFailure { handle, .. }
            | SyncError::TargetNeverResolved { handle, .. }
            | SyncError::TargetRemoved { handle, .. } => Some(handle),
            SyncError::Decode(_) | SyncError::Encode(_) | SyncError::Transport(_) => None,
        }
    }
}
