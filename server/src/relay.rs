use std::{
    collections::{BTreeMap, VecDeque},
    fmt,
    sync::{Arc, Mutex, MutexGuard},
};

use log::{info, warn};

use meetup_shared::{Transport, TransportError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u64);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "connection#{}", self.0)
    }
}

#[derive(Default)]
struct RelayState {
    next_id: u64,
    // outgoing queue per connected client
    outboxes: BTreeMap<ConnectionId, VecDeque<Vec<u8>>>,
    relayed: u64,
}

/// In-process fan-out relay.
///
/// Messages are rebroadcast in the order the relay receives them, and each client
/// reads its own queue in that order.
#[derive(Clone, Default)]
pub struct Relay {
    state: Arc<Mutex<RelayState>>,
}

impl Relay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new client connection. It only sees messages sent from now on.
    pub fn connect(&self) -> Result<RelayConnection, TransportError> {
        let mut state = lock(&self.state)?;
        state.next_id += 1;
        let id = ConnectionId(state.next_id);
        state.outboxes.insert(id, VecDeque::new());
        info!("Incoming connection: {}", id);

        Ok(RelayConnection {
            id,
            state: self.state.clone(),
        })
    }

    pub fn connection_count(&self) -> usize {
        lock(&self.state)
            .map(|state| state.outboxes.len())
            .unwrap_or(0)
    }

    /// Total number of messages accepted for rebroadcast.
    pub fn relayed_count(&self) -> u64 {
        lock(&self.state).map(|state| state.relayed).unwrap_or(0)
    }
}

/// A client's end of a [`Relay`]. Disconnects when dropped.
pub struct RelayConnection {
    id: ConnectionId,
    state: Arc<Mutex<RelayState>>,
}

impl RelayConnection {
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Leaves the relay. Undelivered messages for this connection are dropped.
    pub fn disconnect(&mut self) {
        if let Ok(mut state) = lock(&self.state) {
            if state.outboxes.remove(&self.id).is_some() {
                info!("Closed {}", self.id);
            }
        }
    }
}

impl Transport for RelayConnection {
    fn send(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        let mut state = lock(&self.state)?;
        if !state.outboxes.contains_key(&self.id) {
            return Err(TransportError::NotConnected {
                bytes: payload.len(),
            });
        }

        for outbox in state.outboxes.values_mut() {
            outbox.push_back(payload.to_vec());
        }
        state.relayed += 1;
        Ok(())
    }

    fn receive(&mut self) -> Result<Option<Vec<u8>>, TransportError> {
        let mut state = lock(&self.state)?;
        match state.outboxes.get_mut(&self.id) {
            Some(outbox) => Ok(outbox.pop_front()),
            None => Err(TransportError::ConnectionClosed),
        }
    }

    fn is_connected(&self) -> bool {
        lock(&self.state)
            .map(|state| state.outboxes.contains_key(&self.id))
            .unwrap_or(false)
    }
}

impl Drop for RelayConnection {
    fn drop(&mut self) {
        self.disconnect();
    }
}

fn lock(state: &Mutex<RelayState>) -> Result<MutexGuard<'_, RelayState>, TransportError> {
    state.lock().map_err(|_| {
        warn!("Relay state lock is poisoned");
        TransportError::LockPoisoned
    })
}
