//! # Entity/Component Store
//!
//! The central container: owns the entity store and one component array per
//! component type, created lazily the first time a type is used and kept
//! for the lifetime of the store.

use std::any::{type_name, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};

use super::component::{Component, ComponentArray, ErasedArray};
use super::entity::{Entity, EntityStore};
use super::query::{ComponentSet, DefaultComponents};
use super::view::View;
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};

/// Identity of a [`Store`], used by views as their back-reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StoreId(u64);

impl StoreId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// The entity/component store.
///
/// Component operations do not check entity liveness: components can be
/// attached to any handle, and only [`destroy`](Self::destroy) ties the two
/// together.
///
/// # Example
///
/// ```rust
/// use strata_core::Store;
///
/// #[derive(Clone, Copy, Debug, Default, PartialEq)]
/// struct Position { x: i32, y: i32 }
///
/// let mut store = Store::new();
/// let e = store.create();
/// store.insert(e, Position { x: 1, y: 1 }).unwrap();
///
/// let view = store.view::<(Position,)>();
/// for &entity in &view {
///     assert_eq!(view.get::<Position>(&store, entity), Ok(&Position { x: 1, y: 1 }));
/// }
/// ```
pub struct Store {
    id: StoreId,
    entities: EntityStore,
    /// One array per component type, keyed by the type's `TypeId`.
    components: HashMap<TypeId, Box<dyn ErasedArray>>,
    config: StoreConfig,
}

impl Default for Store {
    fn default() -> Self {
        Self::with_config(StoreConfig::default())
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("id", &self.id)
            .field("entities", &self.entities.len())
            .field("arrays", &self.components.len())
            .field("capacity", &self.config.capacity)
            .finish()
    }
}

impl Store {
    /// Creates a store with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose component arrays hold at most
    /// `config.capacity` components each.
    #[must_use]
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            id: StoreId::next(),
            entities: EntityStore::new(),
            components: HashMap::new(),
            config,
        }
    }

    /// Identity of this store.
    #[inline]
    #[must_use]
    pub fn id(&self) -> StoreId {
        self.id
    }

    /// Capacity of each component array.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// The configuration this store was built with.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // =========================================================================
    // Entity lifecycle
    // =========================================================================

    /// Creates an entity, recycling the oldest destroyed handle first.
    pub fn create(&mut self) -> Entity {
        let entity = self.entities.create();
        tracing::trace!(%entity, "entity created");
        entity
    }

    /// Destroys an entity and removes its components from every array.
    ///
    /// Arrays are visited in unspecified order and the fan-out stops at the
    /// first failure; removals already made are not rolled back.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if the entity is not alive, or the first
    /// array failure.
    pub fn destroy(&mut self, entity: Entity) -> StoreResult<()> {
        self.entities.destroy(entity)?;

        for array in self.components.values_mut() {
            if !array.contains(entity) {
                continue;
            }
            array.destroy(entity).map_err(|err| {
                tracing::debug!(%entity, component = array.type_name(), %err, "destroy fan-out failed");
                err
            })?;
        }

        tracing::trace!(%entity, "entity destroyed");
        Ok(())
    }

    /// Destroys every entity and empties every array. Arrays stay
    /// registered.
    ///
    /// # Errors
    ///
    /// Propagates array failures; the provided layouts never fail.
    pub fn clear(&mut self) -> StoreResult<()> {
        self.entities.clear()?;
        for array in self.components.values_mut() {
            array.clear()?;
        }
        tracing::debug!(arrays = self.components.len(), "store cleared");
        Ok(())
    }

    /// Checks if an entity is alive.
    #[inline]
    #[must_use]
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.contains(entity)
    }

    /// Number of living entities.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Checks if no entity is alive.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// The living entities.
    #[inline]
    #[must_use]
    pub fn entities(&self) -> &EntityStore {
        &self.entities
    }

    // =========================================================================
    // Typed component access
    // =========================================================================

    /// Attaches a default value of every type in `Q`, left to right.
    ///
    /// Stops at the first failure without rolling back earlier insertions.
    ///
    /// # Errors
    ///
    /// [`StoreError::Failed`] if any insertion failed, including because the
    /// entity already had the component.
    pub fn emplace<Q: DefaultComponents>(&mut self, entity: Entity) -> StoreResult<()> {
        Q::emplace(self, entity).map_err(|err| {
            tracing::debug!(%entity, components = type_name::<Q>(), %err, "emplace failed");
            StoreError::Failed
        })
    }

    /// Attaches `value` to `entity`.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Exists`] if the entity already has a `T`; the stored
    ///   value is left unchanged.
    /// - [`StoreError::MaxEntities`] if the `T` array is full.
    pub fn insert<T: Component>(&mut self, entity: Entity, value: T) -> StoreResult<()> {
        let array = self.array_or_register::<T>()?;
        if array.contains(entity) {
            return Err(StoreError::exists::<T>(entity));
        }
        array.add(entity, value)
    }

    /// Checks if the entity has a `T`. False if `T` was never registered.
    #[inline]
    #[must_use]
    pub fn contains<T: Component>(&self, entity: Entity) -> bool {
        self.components
            .get(&TypeId::of::<T>())
            .is_some_and(|array| array.contains(entity))
    }

    /// Checks if the entity has every type in `Q`.
    #[inline]
    #[must_use]
    pub fn all_of<Q: ComponentSet>(&self, entity: Entity) -> bool {
        Q::all_of(self, entity)
    }

    /// Checks if the entity has at least one type in `Q`.
    #[inline]
    #[must_use]
    pub fn any_of<Q: ComponentSet>(&self, entity: Entity) -> bool {
        Q::any_of(self, entity)
    }

    /// Detaches and returns the entity's `T`.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if the entity has no `T` or `T` was never
    /// registered.
    pub fn erase<T: Component>(&mut self, entity: Entity) -> StoreResult<T> {
        self.array_mut::<T>()
            .ok_or(StoreError::NotFound(entity))?
            .remove(entity)
    }

    /// Reference to the entity's `T`.
    ///
    /// # Errors
    ///
    /// [`StoreError::OutOfRange`] if absent.
    #[inline]
    pub fn get<T: Component>(&self, entity: Entity) -> StoreResult<&T> {
        self.array::<T>()
            .ok_or_else(|| StoreError::out_of_range::<T>(entity))?
            .get(entity)
    }

    /// Mutable reference to the entity's `T`.
    ///
    /// # Errors
    ///
    /// [`StoreError::OutOfRange`] if absent.
    #[inline]
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> StoreResult<&mut T> {
        self.array_mut::<T>()
            .ok_or_else(|| StoreError::out_of_range::<T>(entity))?
            .get_mut(entity)
    }

    /// Copy of the entity's `T`.
    ///
    /// # Errors
    ///
    /// [`StoreError::OutOfRange`] if absent.
    #[inline]
    pub fn get_cloned<T: Component + Clone>(&self, entity: Entity) -> StoreResult<T> {
        self.get::<T>(entity).cloned()
    }

    /// References to every component in `Q`, in tuple order.
    ///
    /// # Errors
    ///
    /// [`StoreError::OutOfRange`] naming the first missing type.
    #[inline]
    pub fn get_multiple<Q: ComponentSet>(&self, entity: Entity) -> StoreResult<Q::Refs<'_>> {
        Q::fetch(self, entity)
    }

    /// Mutable references to every component in `Q`, in tuple order.
    ///
    /// # Errors
    ///
    /// [`StoreError::Failed`] if a type repeats in `Q`, otherwise
    /// [`StoreError::OutOfRange`] naming the first missing type.
    #[inline]
    pub fn get_multiple_mut<Q: ComponentSet>(
        &mut self,
        entity: Entity,
    ) -> StoreResult<Q::Muts<'_>> {
        Q::fetch_mut(self, entity)
    }

    /// Snapshot of the living entities that have every type in `Q`.
    #[must_use]
    pub fn view<Q: ComponentSet>(&self) -> View {
        let matched: HashSet<Entity> = self
            .entities
            .iter()
            .copied()
            .filter(|&entity| Q::all_of(self, entity))
            .collect();
        tracing::trace!(components = type_name::<Q>(), matched = matched.len(), "view built");
        View::new(matched, self)
    }

    // =========================================================================
    // Arrays
    // =========================================================================

    /// The array for `T`, if registered.
    #[must_use]
    pub fn array<T: Component>(&self) -> Option<&ComponentArray<T>> {
        self.components
            .get(&TypeId::of::<T>())
            .and_then(|array| array.as_any().downcast_ref())
    }

    /// The mutable array for `T`, if registered.
    pub fn array_mut<T: Component>(&mut self) -> Option<&mut ComponentArray<T>> {
        self.components
            .get_mut(&TypeId::of::<T>())
            .and_then(|array| array.as_any_mut().downcast_mut())
    }

    /// Number of stored `T` components.
    #[must_use]
    pub fn component_count<T: Component>(&self) -> usize {
        self.array::<T>().map_or(0, ComponentArray::size)
    }

    /// Names of every registered component type, in unspecified order.
    pub fn registered_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.components.values().map(|array| array.type_name())
    }

    pub(crate) fn arrays_mut(&mut self) -> &mut HashMap<TypeId, Box<dyn ErasedArray>> {
        &mut self.components
    }

    fn array_or_register<T: Component>(&mut self) -> StoreResult<&mut ComponentArray<T>> {
        let capacity = self.config.capacity;
        self.components
            .entry(TypeId::of::<T>())
            .or_insert_with(|| {
                tracing::debug!(component = type_name::<T>(), capacity, "component array registered");
                let array: ComponentArray<T> = ComponentArray::with_capacity(capacity);
                Box::new(array)
            })
            .as_any_mut()
            .downcast_mut()
            .ok_or(StoreError::Failed)
    }
}
