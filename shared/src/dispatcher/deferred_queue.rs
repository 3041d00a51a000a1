use std::{
    collections::{HashMap, VecDeque},
    time::{Duration, Instant},
};

use crate::{ObjectHandle, TransformChannel, Vector3};

/// A transform that arrived while its target was still loading.
#[derive(Clone, Debug, PartialEq)]
pub struct DeferredMutation {
    pub channel: TransformChannel,
    pub value: Vector3,
    pub deferred_at: Instant,
}

impl DeferredMutation {
    pub fn operation(&self) -> &'static str {
        self.channel.operation()
    }
}

struct HandleQueue {
    entries: VecDeque<DeferredMutation>,
    next_retry: Instant,
    attempts: u32,
}

/// Per-handle FIFO of deferred transforms, with one retry timer per handle.
///
/// Entries for one handle always leave in the order they were deferred, whether they
/// are applied, expired or discarded.
pub struct DeferredQueue {
    queues: HashMap<ObjectHandle, HandleQueue>,
    retry_interval: Duration,
}

impl DeferredQueue {
    pub fn new(retry_interval: Duration) -> Self {
        Self {
            queues: HashMap::new(),
            retry_interval,
        }
    }

    pub fn defer(&mut self, handle: ObjectHandle, mutation: DeferredMutation) {
        let next_retry = mutation.deferred_at + self.retry_interval;
        self.queues
            .entry(handle)
            .or_insert_with(|| HandleQueue {
                entries: VecDeque::new(),
                next_retry,
                attempts: 0,
            })
            .entries
            .push_back(mutation);
    }

    pub fn is_waiting(&self, handle: &ObjectHandle) -> bool {
        self.queues.contains_key(handle)
    }

    pub fn waiting_for(&self, handle: &ObjectHandle) -> usize {
        self.queues
            .get(handle)
            .map(|queue| queue.entries.len())
            .unwrap_or(0)
    }

    /// Retries already made for `handle`.
    pub fn attempts(&self, handle: &ObjectHandle) -> u32 {
        self.queues
            .get(handle)
            .map(|queue| queue.attempts)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.queues.values().map(|queue| queue.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }

    /// Removes and returns everything waiting on `handle`, oldest first.
    pub fn take(&mut self, handle: &ObjectHandle) -> Vec<DeferredMutation> {
        self.queues
            .remove(handle)
            .map(|queue| queue.entries.into())
            .unwrap_or_default()
    }

    /// Handles whose retry timer has fired, sorted so retries run in a stable order.
    pub fn due(&self, now: &Instant) -> Vec<ObjectHandle> {
        let mut handles: Vec<ObjectHandle> = self
            .queues
            .iter()
            .filter(|(_, queue)| queue.next_retry <= *now)
            .map(|(handle, _)| handle.clone())
            .collect();
        handles.sort();
        handles
    }

    pub fn reschedule(&mut self, handle: &ObjectHandle, now: &Instant) {
        if let Some(queue) = self.queues.get_mut(handle) {
            queue.next_retry = *now + self.retry_interval;
            queue.attempts += 1;
        }
    }

    /// Removes entries that have waited at least `window`, oldest first.
    pub fn expire(
        &mut self,
        handle: &ObjectHandle,
        now: &Instant,
        window: Duration,
    ) -> Vec<DeferredMutation> {
        let Some(queue) = self.queues.get_mut(handle) else {
            return Vec::new();
        };

        let mut expired = Vec::new();
        while let Some(front) = queue.entries.front() {
            if now.saturating_duration_since(front.deferred_at) < window {
                break;
            }
            if let Some(entry) = queue.entries.pop_front() {
                expired.push(entry);
            }
        }

        if queue.entries.is_empty() {
            self.queues.remove(handle);
        }
        expired
    }
}
