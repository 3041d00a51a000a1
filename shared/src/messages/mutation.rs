use std::fmt;

use crate::{ObjectHandle, Vector3};

/// Built-in primitive shapes, constructed synchronously from a color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Plane,
    Box,
    Sphere,
    Cone,
}

impl GeometryKind {
    pub const ALL: [GeometryKind; 4] = [
        GeometryKind::Plane,
        GeometryKind::Box,
        GeometryKind::Sphere,
        GeometryKind::Cone,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            GeometryKind::Plane => "Plane",
            GeometryKind::Box => "Box",
            GeometryKind::Sphere => "Sphere",
            GeometryKind::Cone => "Cone",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

/// What a scene object is built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Geometry(GeometryKind),
    Asset,
}

impl ObjectKind {
    pub const ASSET_NAME: &'static str = "Asset";

    pub fn name(&self) -> &'static str {
        match self {
            ObjectKind::Geometry(geometry) => geometry.name(),
            ObjectKind::Asset => Self::ASSET_NAME,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        if name == Self::ASSET_NAME {
            return Some(ObjectKind::Asset);
        }
        GeometryKind::from_name(name).map(ObjectKind::Geometry)
    }

    /// Recovers the kind from a handle such as `Box3` or `12 - JSON File`, for peers
    /// that leave the kind out of their Add messages.
    ///
    /// Only the start of the handle counts (after an optional `<n> - ` prefix), so a
    /// namespace suffix such as `Sphere1-Box` does not change the answer.
    pub fn infer_from_handle(handle: &str) -> Option<Self> {
        let name = strip_ordinal_prefix(handle);
        if name.starts_with("JSON") || name.starts_with(Self::ASSET_NAME) {
            return Some(ObjectKind::Asset);
        }
        GeometryKind::ALL
            .into_iter()
            .find(|kind| name.starts_with(kind.name()))
            .map(ObjectKind::Geometry)
    }
}

// `12 - JSON File` -> `JSON File`
fn strip_ordinal_prefix(handle: &str) -> &str {
    let trimmed = handle.trim_start();
    let digits = trimmed.len() - trimmed.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return trimmed;
    }
    trimmed[digits..]
        .trim_start()
        .strip_prefix('-')
        .map(str::trim_start)
        .unwrap_or(trimmed)
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything needed to construct a new object.
#[derive(Clone, Debug, PartialEq)]
pub enum ObjectSpec {
    /// `color` is the raw payload, validated when the object is built.
    Primitive { geometry: GeometryKind, color: String },
    /// `name` identifies a model to fetch and parse.
    Asset { name: String },
}

impl ObjectSpec {
    pub fn primitive(geometry: GeometryKind, color: impl Into<String>) -> Self {
        ObjectSpec::Primitive {
            geometry,
            color: color.into(),
        }
    }

    pub fn asset(name: impl Into<String>) -> Self {
        ObjectSpec::Asset { name: name.into() }
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            ObjectSpec::Primitive { geometry, .. } => ObjectKind::Geometry(*geometry),
            ObjectSpec::Asset { .. } => ObjectKind::Asset,
        }
    }

    pub fn payload(&self) -> &str {
        match self {
            ObjectSpec::Primitive { color, .. } => color,
            ObjectSpec::Asset { name } => name,
        }
    }
}

/// Which part of a transform a mutation overwrites.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransformChannel {
    Position,
    Rotation,
    Scale,
}

impl TransformChannel {
    /// Name of the mutation that writes this channel.
    pub fn operation(&self) -> &'static str {
        match self {
            TransformChannel::Position => "translate",
            TransformChannel::Rotation => "rotate",
            TransformChannel::Scale => "scale",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum MutationKind {
    Add(ObjectSpec),
    Remove,
    Translate(Vector3),
    Rotate(Vector3),
    Scale(Vector3),
}

impl MutationKind {
    pub fn name(&self) -> &'static str {
        match self {
            MutationKind::Add(_) => "add",
            MutationKind::Remove => "remove",
            MutationKind::Translate(_) => "translate",
            MutationKind::Rotate(_) => "rotate",
            MutationKind::Scale(_) => "scale",
        }
    }

    /// Returns the channel and absolute value for Translate, Rotate and Scale.
    pub fn transform(&self) -> Option<(TransformChannel, Vector3)> {
        match self {
            MutationKind::Translate(vector) => Some((TransformChannel::Position, *vector)),
            MutationKind::Rotate(vector) => Some((TransformChannel::Rotation, *vector)),
            MutationKind::Scale(vector) => Some((TransformChannel::Scale, *vector)),
            MutationKind::Add(_) | MutationKind::Remove => None,
        }
    }
}

/// One complete scene change. Values are absolute, so a mutation never depends on
/// the ones before it other than on its target existing.
#[derive(Clone, Debug, PartialEq)]
pub struct Mutation {
    pub handle: ObjectHandle,
    pub kind: MutationKind,
}

impl Mutation {
    pub fn new(handle: impl Into<ObjectHandle>, kind: MutationKind) -> Self {
        Self {
            handle: handle.into(),
            kind,
        }
    }

    pub fn add(handle: impl Into<ObjectHandle>, spec: ObjectSpec) -> Self {
        Self::new(handle, MutationKind::Add(spec))
    }

    pub fn remove(handle: impl Into<ObjectHandle>) -> Self {
        Self::new(handle, MutationKind::Remove)
    }

    pub fn translate(handle: impl Into<ObjectHandle>, position: Vector3) -> Self {
        Self::new(handle, MutationKind::Translate(position))
    }

    pub fn rotate(handle: impl Into<ObjectHandle>, rotation: Vector3) -> Self {
        Self::new(handle, MutationKind::Rotate(rotation))
    }

    pub fn scale(handle: impl Into<ObjectHandle>, scale: Vector3) -> Self {
        Self::new(handle, MutationKind::Scale(scale))
    }
}
