//! # Component Arrays
//!
//! Each component type gets one [`ComponentArray`]: a dense `Vec` of values
//! indexed through a [`MemoryLayout`]. The store keeps arrays of different
//! types side by side behind the [`ErasedArray`] interface and recovers the
//! concrete type by downcasting.

use std::any::Any;

use super::entity::Entity;
use super::layout::{Compressed, MemoryLayout};
use crate::error::{StoreError, StoreResult};

/// Marker trait for component types.
///
/// Every `Send + 'static` type is a component; its [`std::any::TypeId`] is the
/// registry key.
pub trait Component: Any + Send {}

impl<T: Any + Send> Component for T {}

/// Operations the store needs on an array without knowing its component type.
pub trait ErasedArray: Send {
    /// Removes the entity's component, if any is stored here.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if the entity has no component in this array.
    fn destroy(&mut self, entity: Entity) -> StoreResult<()>;

    /// Removes every component.
    ///
    /// # Errors
    ///
    /// Propagates layout failures.
    fn clear(&mut self) -> StoreResult<()>;

    /// Checks if the entity has a component in this array.
    fn contains(&self, entity: Entity) -> bool;

    /// Number of stored components.
    fn size(&self) -> usize;

    /// Name of the stored component type.
    fn type_name(&self) -> &'static str;

    /// Upcast for downcasting to the concrete array.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting to the concrete array.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Dense storage for one component type.
///
/// # Example
///
/// ```rust
/// use strata_core::{ComponentArray, Entity};
///
/// let mut healths: ComponentArray<u32> = ComponentArray::with_capacity(8);
/// healths.add(Entity::new(3), 100).unwrap();
/// *healths.get_mut(Entity::new(3)).unwrap() -= 10;
/// assert_eq!(healths.get_cloned(Entity::new(3)), Ok(90));
/// ```
#[derive(Debug, Clone)]
pub struct ComponentArray<T, L = Compressed> {
    /// Values in dense order; `values[layout.get(e)]` belongs to `e`.
    values: Vec<T>,
    layout: L,
}

impl<T, L: MemoryLayout> Default for ComponentArray<T, L> {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            layout: L::default(),
        }
    }
}

impl<T, L: MemoryLayout> ComponentArray<T, L> {
    /// Creates an empty array holding at most `capacity` components.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::new(),
            layout: L::with_capacity(capacity),
        }
    }

    /// Attaches `value` to `entity`.
    ///
    /// No duplicate check is done here; see [`Store::insert`].
    ///
    /// # Errors
    ///
    /// [`StoreError::MaxEntities`] when the array is full.
    ///
    /// [`Store::insert`]: crate::Store::insert
    pub fn add(&mut self, entity: Entity, value: T) -> StoreResult<()> {
        let index = self.layout.add(entity)?;
        debug_assert_eq!(index, self.values.len());
        self.values.push(value);
        Ok(())
    }

    /// Detaches and returns the entity's value.
    ///
    /// The last value moves into the freed slot, so dense order is not
    /// preserved across removals.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if the entity has no value here.
    pub fn remove(&mut self, entity: Entity) -> StoreResult<T> {
        let removal = self.layout.remove(entity)?;
        debug_assert_eq!(removal.last + 1, self.values.len());

        self.values.swap(removal.index, removal.last);
        self.values
            .pop()
            .ok_or(StoreError::NotFound(entity))
    }

    /// Reference to the entity's value.
    ///
    /// # Errors
    ///
    /// [`StoreError::OutOfRange`] if absent.
    #[inline]
    pub fn get(&self, entity: Entity) -> StoreResult<&T> {
        self.layout
            .get(entity)
            .ok()
            .and_then(|index| self.values.get(index))
            .ok_or_else(|| StoreError::out_of_range::<T>(entity))
    }

    /// Mutable reference to the entity's value.
    ///
    /// # Errors
    ///
    /// [`StoreError::OutOfRange`] if absent.
    #[inline]
    pub fn get_mut(&mut self, entity: Entity) -> StoreResult<&mut T> {
        match self.layout.get(entity) {
            Ok(index) => self
                .values
                .get_mut(index)
                .ok_or_else(|| StoreError::out_of_range::<T>(entity)),
            Err(_) => Err(StoreError::out_of_range::<T>(entity)),
        }
    }

    /// Copy of the entity's value.
    ///
    /// # Errors
    ///
    /// [`StoreError::OutOfRange`] if absent.
    #[inline]
    pub fn get_cloned(&self, entity: Entity) -> StoreResult<T>
    where
        T: Clone,
    {
        self.get(entity).cloned()
    }

    /// Checks if the entity has a value here.
    #[inline]
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.layout.contains(entity)
    }

    /// Number of stored values.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.layout.size()
    }

    /// Checks if no value is stored.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Maximum number of stored values.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.layout.capacity()
    }

    /// Removes every value.
    ///
    /// # Errors
    ///
    /// Propagates layout failures.
    pub fn clear(&mut self) -> StoreResult<()> {
        self.layout.clear()?;
        self.values.clear();
        Ok(())
    }

    /// Values in dense order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// Mutable values in dense order.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Owning entities in dense order, parallel to [`as_slice`](Self::as_slice).
    #[inline]
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        self.layout.entities()
    }

    /// Iterates over `(entity, value)` pairs in dense order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.layout.entities().iter().copied().zip(self.values.iter())
    }

    /// Iterates mutably over `(entity, value)` pairs in dense order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.layout
            .entities()
            .iter()
            .copied()
            .zip(self.values.iter_mut())
    }
}

impl<T, L> ErasedArray for ComponentArray<T, L>
where
    T: Component,
    L: MemoryLayout + Send + 'static,
{
    fn destroy(&mut self, entity: Entity) -> StoreResult<()> {
        self.remove(entity).map(drop)
    }

    fn clear(&mut self) -> StoreResult<()> {
        ComponentArray::clear(self)
    }

    fn contains(&self, entity: Entity) -> bool {
        ComponentArray::contains(self, entity)
    }

    fn size(&self) -> usize {
        ComponentArray::size(self)
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
