pub mod error;

use error::TransportError;

/// Moves encoded mutations between a client and the relay.
///
/// The relay echoes every message back to its sender, so a client applies its own
/// mutations only when they come back through [`Transport::receive`].
pub trait Transport {
    /// Hands one encoded mutation to the relay.
    fn send(&mut self, payload: &[u8]) -> Result<(), TransportError>;

    /// Returns the next message from the relay, or `None` when nothing is waiting.
    fn receive(&mut self) -> Result<Option<Vec<u8>>, TransportError>;

    fn is_connected(&self) -> bool;
}
