use crate::{
    resolver::{asset_source::LoadId, renderable::Renderable},
    ObjectHandle, ObjectKind, TransformChannel, Vector3,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vector3,
    pub rotation: Vector3,
    pub scale: Vector3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
        }
    }
}

impl Transform {
    pub fn get(&self, channel: TransformChannel) -> Vector3 {
        match channel {
            TransformChannel::Position => self.position,
            TransformChannel::Rotation => self.rotation,
            TransformChannel::Scale => self.scale,
        }
    }

    pub fn set(&mut self, channel: TransformChannel, value: Vector3) {
        match channel {
            TransformChannel::Position => self.position = value,
            TransformChannel::Rotation => self.rotation = value,
            TransformChannel::Scale => self.scale = value,
        }
    }
}

/// Construction state of a record's renderable.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderState {
    /// Waiting on the asset load with this id.
    Pending(LoadId),
    Ready(Renderable),
}

/// Local state of one scene object.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneObjectRecord {
    handle: ObjectHandle,
    kind: ObjectKind,
    render_state: RenderState,
    transform: Transform,
}

impl SceneObjectRecord {
    pub(crate) fn ready(handle: ObjectHandle, kind: ObjectKind, renderable: Renderable) -> Self {
        Self {
            handle,
            kind,
            render_state: RenderState::Ready(renderable),
            transform: Transform::default(),
        }
    }

    pub(crate) fn pending(handle: ObjectHandle, kind: ObjectKind, load_id: LoadId) -> Self {
        Self {
            handle,
            kind,
            render_state: RenderState::Pending(load_id),
            transform: Transform::default(),
        }
    }

    pub fn handle(&self) -> &ObjectHandle {
        &self.handle
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn render_state(&self) -> &RenderState {
        &self.render_state
    }

    pub fn renderable(&self) -> Option<&Renderable> {
        match &self.render_state {
            RenderState::Ready(renderable) => Some(renderable),
            RenderState::Pending(_) => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.render_state, RenderState::Pending(_))
    }

    pub fn pending_load(&self) -> Option<LoadId> {
        match self.render_state {
            RenderState::Pending(load_id) => Some(load_id),
            RenderState::Ready(_) => None,
        }
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn position(&self) -> Vector3 {
        self.transform.position
    }

    pub fn rotation(&self) -> Vector3 {
        self.transform.rotation
    }

    pub fn scale(&self) -> Vector3 {
        self.transform.scale
    }

    pub(crate) fn set_transform(&mut self, channel: TransformChannel, value: Vector3) {
        self.transform.set(channel, value);
    }

    /// Moves a record waiting on `load_id` to Ready. Returns false, changing nothing,
    /// if the record is already Ready or waits on a different load.
    pub(crate) fn resolve(&mut self, load_id: LoadId, renderable: Renderable) -> bool {
        if self.pending_load() != Some(load_id) {
            return false;
        }
        self.render_state = RenderState::Ready(renderable);
        true
    }
}
