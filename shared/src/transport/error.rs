use thiserror::Error;

/// Errors that can occur while moving encoded mutations to or from the relay
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// No active connection to the relay
    #[error("Not connected to the relay. The {bytes} byte message was not sent")]
    NotConnected {
        bytes: usize,
    },

    /// Relay dropped this connection while receiving
    #[error("Connection to the relay was closed")]
    ConnectionClosed,

    /// Shared relay state is unusable because a holder of its lock panicked
    #[error("Relay state lock is poisoned - a panic occurred while holding the lock")]
    LockPoisoned,
}
