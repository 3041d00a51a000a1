use serde::Deserialize;

use crate::{resolver::error::ResolveError, GeometryKind};

/// 24-bit RGB color, `0xRRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    pub const WHITE: Color = Color(0xFF_FF_FF);
    pub const RED: Color = Color(0xFF_00_00);
    pub const GREEN: Color = Color(0x00_FF_00);
    pub const BLUE: Color = Color(0x00_00_FF);

    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self((u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b))
    }

    /// Parses `0xRRGGBB`, `#RRGGBB` or bare hex digits, one to six of them.
    pub fn parse(payload: &str) -> Result<Self, ResolveError> {
        let invalid = |reason: &'static str| ResolveError::InvalidPayload {
            kind: "color",
            payload: payload.to_string(),
            reason,
        };

        let trimmed = payload.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .or_else(|| trimmed.strip_prefix('#'))
            .unwrap_or(trimmed);

        if digits.is_empty() {
            return Err(invalid("no hex digits"));
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid("not a hex number"));
        }
        if digits.len() > 6 {
            return Err(invalid("more than six hex digits"));
        }

        u32::from_str_radix(digits, 16)
            .map(Color)
            .map_err(|_| invalid("not a hex number"))
    }

    pub fn hex(&self) -> u32 {
        self.0
    }

    pub fn r(&self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    pub fn g(&self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    pub fn b(&self) -> u8 {
        (self.0 & 0xFF) as u8
    }
}

/// Tessellation of a primitive, in object space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GeometryParams {
    Plane {
        width: f64,
        height: f64,
        width_segments: u32,
        height_segments: u32,
    },
    Box {
        width: f64,
        height: f64,
        depth: f64,
        segments: u32,
    },
    Sphere {
        radius: f64,
        width_segments: u32,
        height_segments: u32,
    },
    Cone {
        radius: f64,
        height: f64,
        radial_segments: u32,
    },
}

impl GeometryParams {
    pub fn for_kind(kind: GeometryKind) -> Self {
        match kind {
            GeometryKind::Plane => GeometryParams::Plane {
                width: 1.0,
                height: 1.0,
                width_segments: 10,
                height_segments: 10,
            },
            GeometryKind::Box => GeometryParams::Box {
                width: 1.0,
                height: 1.0,
                depth: 1.0,
                segments: 10,
            },
            GeometryKind::Sphere => GeometryParams::Sphere {
                radius: 1.0,
                width_segments: 32,
                height_segments: 32,
            },
            GeometryKind::Cone => GeometryParams::Cone {
                radius: 1.0,
                height: 1.0,
                radial_segments: 32,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PrimitiveMesh {
    pub geometry: GeometryKind,
    pub params: GeometryParams,
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AssetMaterial {
    #[serde(rename = "DbgName", default)]
    pub name: String,
    #[serde(rename = "colorDiffuse", default)]
    pub diffuse: Option<[f64; 3]>,
}

/// Parsed model file: flat `x, y, z` vertex triples plus face indices.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AssetModel {
    pub vertices: Vec<f64>,
    #[serde(default)]
    pub faces: Vec<u32>,
    #[serde(default)]
    pub materials: Vec<AssetMaterial>,
}

impl AssetModel {
    pub fn parse(asset: &str, bytes: &[u8]) -> Result<Self, ResolveError> {
        let model: AssetModel =
            serde_json::from_slice(bytes).map_err(|error| ResolveError::ParseFailed {
                asset: asset.to_string(),
                reason: error.to_string(),
            })?;

        if model.vertices.len() % 3 != 0 {
            return Err(ResolveError::ParseFailed {
                asset: asset.to_string(),
                reason: format!(
                    "{} vertex components is not a multiple of 3",
                    model.vertices.len()
                ),
            });
        }

        Ok(model)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AssetMesh {
    pub name: String,
    pub model: AssetModel,
}

/// Engine-facing representation of a scene object.
#[derive(Clone, Debug, PartialEq)]
pub enum Renderable {
    Primitive(PrimitiveMesh),
    Asset(AssetMesh),
}

impl Renderable {
    pub fn color(&self) -> Option<Color> {
        match self {
            Renderable::Primitive(mesh) => Some(mesh.color),
            Renderable::Asset(_) => None,
        }
    }
}
