//! # Compacting Layouts
//!
//! A layout maps entity handles to slots of a dense array and keeps that
//! array gap-free under removal:
//!
//! ```text
//! remove(e1):
//!   dense:  [e0, e1, e2, e3]      dense:  [e0, e3, e2]
//!                ^        |   =>               ^
//!                +--------+ last moves into the freed slot
//! ```
//!
//! The component array mirrors every move on its value array, using the
//! [`Removal`] returned here so both sides agree on the same "last" slot.

use std::collections::HashMap;

use super::entity::Entity;
use crate::error::{StoreError, StoreResult};

/// Outcome of a swap-with-last removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Removal {
    /// Slot the removed entity occupied. After the removal it holds the
    /// former last entity, or is one past the end if the removed entity was
    /// the last.
    pub index: usize,
    /// Last occupied slot before the removal.
    pub last: usize,
}

impl Removal {
    /// Checks if the removed entity was the last one (self-swap).
    #[inline]
    #[must_use]
    pub const fn was_last(self) -> bool {
        self.index == self.last
    }
}

/// Mapping between entities and dense indices.
///
/// `add` performs no duplicate check; callers must test [`contains`] first.
///
/// [`contains`]: MemoryLayout::contains
pub trait MemoryLayout: Default {
    /// Registers `entity` at the next dense index and returns it.
    ///
    /// # Errors
    ///
    /// [`StoreError::MaxEntities`] when the layout is full.
    fn add(&mut self, entity: Entity) -> StoreResult<usize>;

    /// Returns the dense index of `entity`.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if `entity` is not registered.
    fn get(&self, entity: Entity) -> StoreResult<usize>;

    /// Unregisters `entity`, moving the last entity into its slot.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if `entity` is not registered.
    fn remove(&mut self, entity: Entity) -> StoreResult<Removal>;

    /// Unregisters every entity.
    ///
    /// # Errors
    ///
    /// Implementations may fail; [`Compressed`] never does.
    fn clear(&mut self) -> StoreResult<()>;

    /// Number of registered entities.
    fn size(&self) -> usize;

    /// Checks if `entity` is registered.
    fn contains(&self, entity: Entity) -> bool;

    /// Maximum number of simultaneously registered entities.
    fn capacity(&self) -> usize;

    /// Entity stored at a dense index.
    fn entity_at(&self, index: usize) -> Option<Entity>;

    /// Registered entities in dense order.
    fn entities(&self) -> &[Entity];

    /// Creates an empty layout bounded by `capacity`.
    fn with_capacity(capacity: usize) -> Self;
}

/// Hash-map backed sparse set.
#[derive(Debug, Clone)]
pub struct Compressed {
    /// Entity -> dense index.
    entity_to_index: HashMap<Entity, usize>,
    /// Dense index -> entity. Its length is the live count.
    index_to_entity: Vec<Entity>,
    capacity: usize,
}

impl Default for Compressed {
    fn default() -> Self {
        Self::with_capacity(crate::config::DEFAULT_CAPACITY)
    }
}

impl MemoryLayout for Compressed {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            entity_to_index: HashMap::new(),
            index_to_entity: Vec::new(),
            capacity,
        }
    }

    fn add(&mut self, entity: Entity) -> StoreResult<usize> {
        let index = self.index_to_entity.len();
        if index >= self.capacity {
            return Err(StoreError::MaxEntities {
                capacity: self.capacity,
            });
        }
        self.entity_to_index.insert(entity, index);
        self.index_to_entity.push(entity);
        Ok(index)
    }

    fn get(&self, entity: Entity) -> StoreResult<usize> {
        self.entity_to_index
            .get(&entity)
            .copied()
            .ok_or(StoreError::NotFound(entity))
    }

    fn remove(&mut self, entity: Entity) -> StoreResult<Removal> {
        let index = self
            .entity_to_index
            .remove(&entity)
            .ok_or(StoreError::NotFound(entity))?;
        let last = self.index_to_entity.len() - 1;

        self.index_to_entity.swap_remove(index);
        if index != last {
            let moved = self.index_to_entity[index];
            self.entity_to_index.insert(moved, index);
        }

        Ok(Removal { index, last })
    }

    fn clear(&mut self) -> StoreResult<()> {
        self.entity_to_index.clear();
        self.index_to_entity.clear();
        Ok(())
    }

    #[inline]
    fn size(&self) -> usize {
        self.index_to_entity.len()
    }

    #[inline]
    fn contains(&self, entity: Entity) -> bool {
        self.entity_to_index.contains_key(&entity)
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    fn entity_at(&self, index: usize) -> Option<Entity> {
        self.index_to_entity.get(index).copied()
    }

    #[inline]
    fn entities(&self) -> &[Entity] {
        &self.index_to_entity
    }
}
