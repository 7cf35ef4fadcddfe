//! Id-keyed arena storage
//!
//! Ids are slot indices handed out in registration order and never reused
//! within one registry, so a stale id resolves to `None` instead of a
//! different record.

use serde::{Deserialize, Serialize};

/// Stable handle to an entity record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Stable handle to a physics body
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// Arena of optional slots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registry<T> {
    slots: Vec<Option<T>>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record and return its slot index
    pub fn insert(&mut self, value: T) -> u32 {
        let id = self.slots.len() as u32;
        self.slots.push(Some(value));
        id
    }

    pub fn try_get(&self, id: u32) -> Option<&T> {
        self.slots.get(id as usize).and_then(Option::as_ref)
    }

    pub fn try_get_mut(&mut self, id: u32) -> Option<&mut T> {
        self.slots.get_mut(id as usize).and_then(Option::as_mut)
    }

    /// Vacate a slot. The index is never handed out again.
    pub fn remove(&mut self, id: u32) -> Option<T> {
        self.slots.get_mut(id as usize).and_then(Option::take)
    }

    /// Two distinct records at once. Either side may be absent.
    pub fn try_get_pair_mut(&mut self, a: u32, b: u32) -> (Option<&mut T>, Option<&mut T>) {
        let (a, b) = (a as usize, b as usize);
        let mut first = None;
        let mut second = None;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if index == a {
                first = slot.as_mut();
            } else if index == b {
                second = slot.as_mut();
            }
        }
        (first, second)
    }

    /// Ids of live records in registration order
    pub fn ids(&self) -> Vec<u32> {
        self.iter().map(|(id, _)| id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|v| (i as u32, v)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (u32, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_mut().map(|v| (i as u32, v)))
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
