use std::collections::HashMap;

use crate::{
    scene::{error::RegistryError, object_record::SceneObjectRecord},
    ObjectHandle,
};

/// Handle-keyed store of every object in the local scene.
///
/// Anyone may read the registry; only the mutation dispatcher writes to it, which is
/// why every mutating method is crate-private.
#[derive(Default)]
pub struct ObjectRegistry {
    records: HashMap<ObjectHandle, SceneObjectRecord>,
    // insertion order, for enumeration
    order: Vec<ObjectHandle>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, handle: &ObjectHandle) -> bool {
        self.records.contains_key(handle)
    }

    pub fn get(&self, handle: &ObjectHandle) -> Option<&SceneObjectRecord> {
        self.records.get(handle)
    }

    /// Handles in the order their records were inserted.
    pub fn list_handles(&self) -> &[ObjectHandle] {
        &self.order
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &SceneObjectRecord> + '_ {
        self.order
            .iter()
            .filter_map(move |handle| self.records.get(handle))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn insert(
        &mut self,
        handle: ObjectHandle,
        record: SceneObjectRecord,
    ) -> Result<(), RegistryError> {
        if self.records.contains_key(&handle) {
            return Err(RegistryError::DuplicateHandle {
                handle: handle.into_string(),
            });
        }

        self.order.push(handle.clone());
        self.records.insert(handle, record);
        Ok(())
    }

    pub(crate) fn get_mut(&mut self, handle: &ObjectHandle) -> Option<&mut SceneObjectRecord> {
        self.records.get_mut(handle)
    }

    pub(crate) fn update<F>(&mut self, handle: &ObjectHandle, apply: F) -> Result<(), RegistryError>
    where
        F: FnOnce(&mut SceneObjectRecord),
    {
        let Some(record) = self.records.get_mut(handle) else {
            return Err(RegistryError::UnknownHandle {
                handle: handle.to_string(),
            });
        };
        apply(record);
        Ok(())
    }

    pub(crate) fn remove(&mut self, handle: &ObjectHandle) -> Option<SceneObjectRecord> {
        let record = self.records.remove(handle)?;
        if let Some(index) = self.order.iter().position(|ordered| ordered == handle) {
            self.order.remove(index);
        }
        Some(record)
    }
}
