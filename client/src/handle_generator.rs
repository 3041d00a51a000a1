use meetup_shared::{ObjectHandle, ObjectKind};

/// Generates `<Kind><ordinal>` handles, e.g. `Box1`, `Asset2`, `Cone3`.
///
/// Ordinals count up across all kinds and are never handed out twice, even after the
/// object that used one has been removed.
pub struct HandleGenerator {
    namespace: Option<String>,
    next_ordinal: u64,
}

impl HandleGenerator {
    pub fn new(namespace: Option<String>) -> Self {
        Self {
            namespace,
            next_ordinal: 1,
        }
    }

    pub fn generate(&mut self, kind: ObjectKind) -> ObjectHandle {
        let ordinal = self.next_ordinal;
        self.next_ordinal += 1;

        match &self.namespace {
            Some(namespace) => ObjectHandle::new(format!("{}{}-{}", kind.name(), ordinal, namespace)),
            None => ObjectHandle::new(format!("{}{}", kind.name(), ordinal)),
        }
    }
}

impl Default for HandleGenerator {
    fn default() -> Self {
        Self::new(None)
    }
}
