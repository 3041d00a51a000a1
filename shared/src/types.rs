use std::fmt;

/// Three components in scene units: position, Euler rotation in radians, or scale factors.
pub type Vector3 = [f64; 3];

/// Stable, creator-chosen name of one scene object, e.g. `Box3`.
///
/// Handles are the only key used to address objects across clients. A handle is never
/// reused after its object has been removed within one session.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectHandle(String);

impl ObjectHandle {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectHandle {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ObjectHandle {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for ObjectHandle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
