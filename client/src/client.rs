use std::time::Instant;

use log::{debug, warn};

use meetup_shared::{
    encode, AssetSource, GeometryKind, Mutation, MutationDispatcher, ObjectHandle, ObjectKind,
    ObjectRegistry, ObjectSpec, SceneEvent, SyncError, Transport, Vector3,
};

use crate::{client_config::ClientConfig, handle_generator::HandleGenerator};

/// One viewer of the shared scene.
///
/// Local edits are only sent; nothing changes locally until the relay echoes the
/// mutation back and [`SceneClient::receive`] applies it. Every client therefore
/// applies the same mutations through the same path.
pub struct SceneClient {
    dispatcher: MutationDispatcher,
    transport: Box<dyn Transport>,
    handles: HandleGenerator,
}

impl SceneClient {
    pub fn new(
        config: ClientConfig,
        transport: Box<dyn Transport>,
        asset_source: Box<dyn AssetSource>,
    ) -> Self {
        Self {
            dispatcher: MutationDispatcher::new(config.sync, asset_source),
            transport,
            handles: HandleGenerator::new(config.handle_namespace),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    /// Read-only view of the local scene, for rendering and UI.
    pub fn registry(&self) -> &ObjectRegistry {
        self.dispatcher.registry()
    }

    pub fn dispatcher(&self) -> &MutationDispatcher {
        &self.dispatcher
    }

    pub fn take_events(&mut self) -> Vec<SceneEvent> {
        self.dispatcher.take_events()
    }

    /// Asks every client to add a primitive of the given color. Returns the new handle.
    pub fn add_primitive(
        &mut self,
        geometry: GeometryKind,
        color: &str,
    ) -> Result<ObjectHandle, SyncError> {
        let handle = self.handles.generate(ObjectKind::Geometry(geometry));
        self.send(&Mutation::add(handle.clone(), ObjectSpec::primitive(geometry, color)))?;
        Ok(handle)
    }

    /// Asks every client to load and add the named asset. Returns the new handle.
    pub fn add_asset(&mut self, asset_name: &str) -> Result<ObjectHandle, SyncError> {
        let handle = self.handles.generate(ObjectKind::Asset);
        self.send(&Mutation::add(handle.clone(), ObjectSpec::asset(asset_name)))?;
        Ok(handle)
    }

    pub fn remove(&mut self, handle: &ObjectHandle) -> Result<(), SyncError> {
        self.send(&Mutation::remove(handle.clone()))
    }

    pub fn translate(&mut self, handle: &ObjectHandle, position: Vector3) -> Result<(), SyncError> {
        self.send(&Mutation::translate(handle.clone(), position))
    }

    pub fn rotate(&mut self, handle: &ObjectHandle, rotation: Vector3) -> Result<(), SyncError> {
        self.send(&Mutation::rotate(handle.clone(), rotation))
    }

    pub fn scale(&mut self, handle: &ObjectHandle, scale: Vector3) -> Result<(), SyncError> {
        self.send(&Mutation::scale(handle.clone(), scale))
    }

    /// Encodes and sends any mutation. Failing to send is reported, never fatal.
    pub fn send(&mut self, mutation: &Mutation) -> Result<(), SyncError> {
        let bytes = encode(mutation)?;
        if let Err(error) = self.transport.send(&bytes) {
            warn!("Could not send {} for {}: {}", mutation.kind.name(), mutation.handle, error);
            return Err(error.into());
        }
        debug!("Sent {} for {}", mutation.kind.name(), mutation.handle);
        Ok(())
    }

    /// Applies everything the relay has delivered, in arrival order, then resumes
    /// deferred work due by `now`. Returns the number of messages received.
    pub fn receive(&mut self, now: &Instant) -> usize {
        let mut received = 0;
        loop {
            match self.transport.receive() {
                Ok(Some(bytes)) => {
                    self.dispatcher.receive(&bytes, now);
                    received += 1;
                }
                Ok(None) => break,
                Err(error) => {
                    self.dispatcher.report(error.into());
                    break;
                }
            }
        }

        self.dispatcher.update(now);
        received
    }
}
