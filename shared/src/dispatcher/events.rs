use std::collections::{vec_deque::IntoIter, VecDeque};

use log::warn;

use crate::{ObjectHandle, SyncError, TransformChannel};

/// Something observers of the scene (renderer, UI) may want to react to.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneEvent {
    /// A record exists but its asset is still loading.
    Loading(ObjectHandle),
    /// A record's renderable is ready to draw.
    Created(ObjectHandle),
    Removed(ObjectHandle),
    Transformed(ObjectHandle, TransformChannel),
    /// A mutation had no effect.
    Error(SyncError),
}

/// Bounded buffer of events waiting to be drained.
///
/// When full, the oldest event is dropped to make room. Observers that only read the
/// registry can ignore events entirely without the buffer growing.
pub struct SceneEvents {
    events: VecDeque<SceneEvent>,
    capacity: usize,
    dropped: u64,
}

impl SceneEvents {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            events: VecDeque::new(),
            capacity,
            dropped: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Events discarded because nobody drained the buffer in time.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub(crate) fn push(&mut self, event: SceneEvent) {
        if self.capacity == 0 {
            self.dropped += 1;
            return;
        }
        if self.events.len() >= self.capacity {
            if self.dropped == 0 {
                warn!(
                    "Scene event buffer is full ({} events); dropping the oldest",
                    self.capacity
                );
            }
            self.events.pop_front();
            self.dropped += 1;
        }
        self.events.push_back(event);
    }

    pub(crate) fn take(&mut self) -> IntoIter<SceneEvent> {
        std::mem::take(&mut self.events).into_iter()
    }
}
