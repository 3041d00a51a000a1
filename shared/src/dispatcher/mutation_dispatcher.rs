use std::time::Instant;

use log::{debug, info, warn};

use crate::{
    dispatcher::{
        config::{DuplicateAddPolicy, SyncConfig},
        deferred_queue::{DeferredMutation, DeferredQueue},
        error::SyncError,
        events::{SceneEvent, SceneEvents},
    },
    messages::codec::decode,
    resolver::{
        asset_source::AssetSource,
        renderable::Renderable,
        resource_resolver::{validate_asset_name, LoadOutcome, ResourceResolver},
    },
    scene::{error::RegistryError, object_record::SceneObjectRecord, object_registry::ObjectRegistry},
    Mutation, MutationKind, ObjectHandle, ObjectSpec, TransformChannel, Vector3,
};

/// Where a successfully dispatched mutation ended up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The registry reflects the mutation.
    Applied,
    /// A pending record was inserted; it becomes ready when its asset loads.
    Loading,
    /// The target is still loading; the mutation waits in its handle's queue.
    Deferred,
}

// An Add whose payload has been checked and can no longer fail validation.
enum PreparedAdd {
    Ready(Renderable),
    Load(String),
}

/// Applies mutations to the scene registry. The only writer of the registry.
///
/// Everything runs on the caller's thread: `receive`/`apply` handle incoming mutations
/// in arrival order, and `update` resumes the deferred work (asset loads and retries).
/// Mutations for one handle take effect in the order they were received.
///
/// Events are buffered until [`MutationDispatcher::take_events`] drains them, which
/// callers should do once per frame. The buffer holds at most
/// [`SyncConfig::event_capacity`] events and drops the oldest beyond that.
pub struct MutationDispatcher {
    config: SyncConfig,
    registry: ObjectRegistry,
    resolver: ResourceResolver,
    deferred: DeferredQueue,
    events: SceneEvents,
}

impl MutationDispatcher {
    pub fn new(config: SyncConfig, asset_source: Box<dyn AssetSource>) -> Self {
        let resolver = ResourceResolver::new(asset_source, config.asset_load_timeout);
        let deferred = DeferredQueue::new(config.retry_interval);
        let events = SceneEvents::new(config.event_capacity);
        Self {
            config,
            registry: ObjectRegistry::new(),
            resolver,
            deferred,
            events,
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    pub fn deferred(&self) -> &DeferredQueue {
        &self.deferred
    }

    pub fn loads_in_flight(&self) -> usize {
        self.resolver.in_flight_count()
    }

    /// Drains the events produced since the last call, oldest first.
    pub fn take_events(&mut self) -> Vec<SceneEvent> {
        self.events.take().collect()
    }

    /// Events lost because the buffer filled up before it was drained.
    pub fn events_dropped(&self) -> u64 {
        self.events.dropped()
    }

    /// Decodes and applies one wire message. Failures are logged and reported as
    /// [`SceneEvent::Error`]; they never stop processing.
    pub fn receive(&mut self, bytes: &[u8], now: &Instant) {
        let mutation = match decode(bytes) {
            Ok(mutation) => mutation,
            Err(error) => {
                self.report(SyncError::from(error));
                return;
            }
        };

        if let Err(error) = self.apply(mutation, now) {
            self.report(error);
        }
    }

    /// Applies one decoded mutation. Errors are returned, not reported as events.
    pub fn apply(&mut self, mutation: Mutation, now: &Instant) -> Result<DispatchOutcome, SyncError> {
        let Mutation { handle, kind } = mutation;
        debug!("Dispatching {} for {}", kind.name(), handle);

        match kind {
            MutationKind::Add(spec) => self.add(handle, spec, now),
            MutationKind::Remove => {
                self.remove(&handle);
                Ok(DispatchOutcome::Applied)
            }
            MutationKind::Translate(value) => {
                self.transform(handle, TransformChannel::Position, value, now)
            }
            MutationKind::Rotate(value) => {
                self.transform(handle, TransformChannel::Rotation, value, now)
            }
            MutationKind::Scale(value) => self.transform(handle, TransformChannel::Scale, value, now),
        }
    }

    /// Resumes deferred work: delivers finished asset loads, then runs due retries.
    pub fn update(&mut self, now: &Instant) {
        for outcome in self.resolver.poll(now) {
            self.complete_load(outcome, now);
        }
        self.retry_deferred(now);
    }

    fn add(
        &mut self,
        handle: ObjectHandle,
        spec: ObjectSpec,
        now: &Instant,
    ) -> Result<DispatchOutcome, SyncError> {
        let exists = self.registry.contains(&handle);
        if exists && self.config.on_duplicate_add == DuplicateAddPolicy::Reject {
            return Err(SyncError::DuplicateHandle {
                handle: handle.into_string(),
            });
        }

        // a rejected payload must leave any existing record untouched
        let kind = spec.kind();
        let prepared = match spec {
            ObjectSpec::Primitive { geometry, color } => self
                .resolver
                .resolve_sync(geometry, &color)
                .map(PreparedAdd::Ready),
            ObjectSpec::Asset { name } => validate_asset_name(&name).map(|()| PreparedAdd::Load(name)),
        }
        .map_err(|error| SyncError::InvalidPayload {
            handle: handle.to_string(),
            reason: error.to_string(),
        })?;

        if exists {
            info!("Overwriting existing object {}", handle);
            self.remove(&handle);
        }

        match prepared {
            PreparedAdd::Ready(renderable) => {
                let record = SceneObjectRecord::ready(handle.clone(), kind, renderable);
                self.registry
                    .insert(handle.clone(), record)
                    .map_err(|error| registry_error(error, "add"))?;

                info!("Created {} {}", kind, handle);
                self.events.push(SceneEvent::Created(handle));
                Ok(DispatchOutcome::Applied)
            }
            PreparedAdd::Load(name) => {
                let load_id = self
                    .resolver
                    .resolve_async(&handle, &name, now)
                    .map_err(|error| SyncError::InvalidPayload {
                        handle: handle.to_string(),
                        reason: error.to_string(),
                    })?;
                let record = SceneObjectRecord::pending(handle.clone(), kind, load_id);
                if let Err(error) = self.registry.insert(handle.clone(), record) {
                    self.resolver.cancel(load_id);
                    return Err(registry_error(error, "add"));
                }

                self.events.push(SceneEvent::Loading(handle));
                Ok(DispatchOutcome::Loading)
            }
        }
    }

    /// Removing an unknown handle is a no-op. Returns whether a record was removed.
    fn remove(&mut self, handle: &ObjectHandle) -> bool {
        for entry in self.deferred.take(handle) {
            self.report(SyncError::TargetRemoved {
                handle: handle.to_string(),
                operation: entry.operation(),
            });
        }

        let Some(record) = self.registry.remove(handle) else {
            debug!("Ignoring remove of unknown object {}", handle);
            return false;
        };

        if let Some(load_id) = record.pending_load() {
            info!("Removed {} while it was loading; cancelling {}", handle, load_id);
            self.resolver.cancel(load_id);
        } else {
            info!("Removed {}", handle);
        }
        self.events.push(SceneEvent::Removed(handle.clone()));
        true
    }

    fn transform(
        &mut self,
        handle: ObjectHandle,
        channel: TransformChannel,
        value: Vector3,
        now: &Instant,
    ) -> Result<DispatchOutcome, SyncError> {
        let Some(record) = self.registry.get(&handle) else {
            return Err(SyncError::UnknownHandle {
                handle: handle.into_string(),
                operation: channel.operation(),
            });
        };

        // queue behind earlier deferred mutations even if the target is ready by now
        if record.is_pending() || self.deferred.is_waiting(&handle) {
            debug!("Deferring {} for {} until it loads", channel.operation(), handle);
            self.deferred.defer(
                handle,
                DeferredMutation {
                    channel,
                    value,
                    deferred_at: *now,
                },
            );
            return Ok(DispatchOutcome::Deferred);
        }

        self.set_transform(&handle, channel, value)?;
        Ok(DispatchOutcome::Applied)
    }

    fn set_transform(
        &mut self,
        handle: &ObjectHandle,
        channel: TransformChannel,
        value: Vector3,
    ) -> Result<(), SyncError> {
        self.registry
            .update(handle, |record| record.set_transform(channel, value))
            .map_err(|error| registry_error(error, channel.operation()))?;
        self.events
            .push(SceneEvent::Transformed(handle.clone(), channel));
        Ok(())
    }

    fn complete_load(&mut self, outcome: LoadOutcome, now: &Instant) {
        let LoadOutcome { id, handle, result } = outcome;

        let waiting = self
            .registry
            .get(&handle)
            .and_then(|record| record.pending_load())
            == Some(id);
        if !waiting {
            debug!("Discarding {} for {}: object no longer waits on it", id, handle);
            return;
        }

        match result {
            Ok(renderable) => {
                if let Some(record) = self.registry.get_mut(&handle) {
                    record.resolve(id, renderable);
                }
                info!("Created {} from loaded asset", handle);
                self.events.push(SceneEvent::Created(handle.clone()));
                self.apply_deferred(&handle);
            }
            Err(error) => {
                self.registry.remove(&handle);
                self.events.push(SceneEvent::Removed(handle.clone()));
                self.report(SyncError::LoadFailure {
                    handle: handle.to_string(),
                    reason: error.to_string(),
                });
                for entry in self.deferred.take(&handle) {
                    self.report(SyncError::TargetNeverResolved {
                        handle: handle.to_string(),
                        operation: entry.operation(),
                        waited: now.saturating_duration_since(entry.deferred_at),
                    });
                }
            }
        }
    }

    fn apply_deferred(&mut self, handle: &ObjectHandle) {
        let entries = self.deferred.take(handle);
        if entries.is_empty() {
            return;
        }
        debug!("Applying {} deferred mutation(s) for {}", entries.len(), handle);
        for entry in entries {
            if let Err(error) = self.set_transform(handle, entry.channel, entry.value) {
                self.report(error);
            }
        }
    }

    fn retry_deferred(&mut self, now: &Instant) {
        for handle in self.deferred.due(now) {
            let pending = match self.registry.get(&handle) {
                Some(record) => record.is_pending(),
                None => {
                    for entry in self.deferred.take(&handle) {
                        self.report(SyncError::TargetRemoved {
                            handle: handle.to_string(),
                            operation: entry.operation(),
                        });
                    }
                    continue;
                }
            };

            if !pending {
                self.apply_deferred(&handle);
                continue;
            }

            if let Some(window) = self.config.max_retry_window {
                for entry in self.deferred.expire(&handle, now, window) {
                    self.report(SyncError::TargetNeverResolved {
                        handle: handle.to_string(),
                        operation: entry.operation(),
                        waited: now.saturating_duration_since(entry.deferred_at),
                    });
                }
            }
            self.deferred.reschedule(&handle, now);
        }
    }

    /// Logs a failure and records it as a [`SceneEvent::Error`].
    pub fn report(&mut self, error: SyncError) {
        warn!("{}", error);
        self.events.push(SceneEvent::Error(error));
    }
}

fn registry_error(error: RegistryError, operation: &'static str) -> SyncError {
    match error {
        RegistryError::DuplicateHandle { handle } => SyncError::DuplicateHandle { handle },
        RegistryError::UnknownHandle { handle } => SyncError::UnknownHandle { handle, operation },
    }
}
