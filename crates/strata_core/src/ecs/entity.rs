//! # Entity Management
//!
//! Entities are plain integer handles. Destroyed handles go back to a FIFO
//! free pool and are handed out again before any new integer is allocated.

use std::collections::hash_set;
use std::collections::{HashSet, VecDeque};
use std::fmt;

use crate::error::{StoreError, StoreResult};

/// Opaque handle identifying one logical object.
///
/// Handles carry no generation counter: after `destroy` the same integer is
/// recycled by a later `create`. A handle retained across a destroy/create
/// cycle silently aliases the new entity, so do not keep handles past their
/// entity's destruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Entity(u32);

impl Entity {
    /// Creates a handle from its raw integer.
    #[inline]
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw integer of this handle.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Entity {
    fn from(index: u32) -> Self {
        Self(index)
    }
}

/// Allocates and recycles entity handles.
///
/// # Example
///
/// ```rust
/// use strata_core::EntityStore;
///
/// let mut entities = EntityStore::new();
/// let e = entities.create();
/// entities.destroy(e).unwrap();
/// assert_eq!(entities.create(), e); // recycled
/// ```
#[derive(Debug, Default)]
pub struct EntityStore {
    /// Destroyed handles, oldest first.
    available: VecDeque<Entity>,
    /// Currently living handles.
    living: HashSet<Entity>,
    /// Next never-used integer.
    next: u32,
}

impl EntityStore {
    /// Creates an empty entity store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a live handle, reusing the oldest destroyed one if any.
    pub fn create(&mut self) -> Entity {
        let entity = match self.available.pop_front() {
            Some(recycled) => recycled,
            None => {
                let fresh = Entity(self.next);
                self.next = self.next.wrapping_add(1);
                fresh
            }
        };
        self.living.insert(entity);
        entity
    }

    /// Destroys a live handle and queues it for reuse.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if `entity` is not currently alive.
    pub fn destroy(&mut self, entity: Entity) -> StoreResult<()> {
        if !self.living.remove(&entity) {
            return Err(StoreError::NotFound(entity));
        }
        self.available.push_back(entity);
        Ok(())
    }

    /// Destroys every live handle.
    ///
    /// # Errors
    ///
    /// Never fails; the `Result` keeps the mutator signatures uniform.
    pub fn clear(&mut self) -> StoreResult<()> {
        self.available.extend(self.living.drain());
        Ok(())
    }

    /// Checks if a handle is currently alive.
    #[inline]
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.living.contains(&entity)
    }

    /// Number of living entities.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.living.len()
    }

    /// Checks if no entity is alive.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.living.is_empty()
    }

    /// Number of distinct integers ever handed out.
    #[inline]
    #[must_use]
    pub fn allocated(&self) -> u32 {
        self.next
    }

    /// Iterates over living entities in unspecified order.
    pub fn iter(&self) -> hash_set::Iter<'_, Entity> {
        self.living.iter()
    }
}

impl<'a> IntoIterator for &'a EntityStore {
    type Item = &'a Entity;
    type IntoIter = hash_set::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_is_dense() {
        let mut store = EntityStore::new();
        let ids: Vec<u32> = (0..4).map(|_| store.create().index()).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_destroy_twice() {
        let mut store = EntityStore::new();
        let e = store.create();
        assert_eq!(store.destroy(e), Ok(()));
        assert_eq!(store.destroy(e), Err(StoreError::NotFound(e)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_recycling_is_fifo() {
        let mut store = EntityStore::new();
        let a = store.create();
        let b = store.create();
        let _c = store.create();

        store.destroy(b).unwrap();
        store.destroy(a).unwrap();

        assert_eq!(store.create(), b);
        assert_eq!(store.create(), a);
        assert_eq!(store.create(), Entity::new(3));
        assert_eq!(store.allocated(), 4);
    }

    #[test]
    fn test_clear_recycles_everything() {
        let mut store = EntityStore::new();
        let created: HashSet<Entity> = (0..3).map(|_| store.create()).collect();

        assert_eq!(store.clear(), Ok(()));
        assert!(store.is_empty());

        let recycled: HashSet<Entity> = (0..3).map(|_| store.create()).collect();
        assert_eq!(created, recycled);
        assert_eq!(store.allocated(), 3);
    }

    #[test]
    fn test_iteration_matches_living() {
        let mut store = EntityStore::new();
        let a = store.create();
        let b = store.create();
        store.destroy(a).unwrap();

        let living: Vec<Entity> = store.iter().copied().collect();
        assert_eq!(living, vec![b]);
        assert!(!store.contains(a));
    }
}
