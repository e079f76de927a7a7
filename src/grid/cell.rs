//! A single grid square.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::EntityId;
use crate::objects::Instance;

/// Unordered stack of instances sharing one square.
///
/// Most squares hold zero to two instances, so storage is inline up to two.
/// Instances are identified by `EntityId`; two of the same kind can share a
/// square.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    instances: SmallVec<[Instance; 2]>,
}

impl Cell {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, instance: Instance) {
        self.instances.push(instance);
    }

    /// Take out the instance with the given id.
    pub fn remove(&mut self, id: EntityId) -> Option<Instance> {
        let index = self.instances.iter().position(|i| i.id == id)?;
        Some(self.instances.remove(index))
    }

    /// Empty the square, returning what was in it.
    pub fn take_all(&mut self) -> SmallVec<[Instance; 2]> {
        std::mem::take(&mut self.instances)
    }

    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Instance> {
        self.instances.iter().find(|i| i.id == id)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Instance] {
        &self.instances
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instance> {
        self.instances.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// The instance drawn on top: text above objects, then highest type id.
    #[must_use]
    pub fn top(&self) -> Option<&Instance> {
        self.instances.iter().max_by_key(|i| i.draw_order())
    }
}
