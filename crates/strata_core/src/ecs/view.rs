//! # Views
//!
//! A view is a point-in-time snapshot of the entities that matched a
//! component set. It does not borrow the store: reads take the store as an
//! argument and are checked against the store identity captured at
//! construction. Membership is frozen, component liveness is not; a member
//! whose component was detached after the snapshot reads as out of range.

use std::any::type_name;
use std::collections::hash_set;
use std::collections::HashSet;

use super::component::Component;
use super::entity::Entity;
use super::query::ComponentSet;
use super::store::{Store, StoreId};
use crate::error::{StoreError, StoreResult};

/// Snapshot of entities matching a component set.
#[derive(Clone, Debug)]
pub struct View {
    entities: HashSet<Entity>,
    store: StoreId,
}

impl View {
    /// Captures `entities` as a view over `store`.
    #[must_use]
    pub fn new(entities: HashSet<Entity>, store: &Store) -> Self {
        Self {
            entities,
            store: store.id(),
        }
    }

    /// Captures `entities` as a view over an optional store.
    ///
    /// # Errors
    ///
    /// [`StoreError::Failed`] if `store` is `None`.
    pub fn with_store(entities: HashSet<Entity>, store: Option<&Store>) -> StoreResult<Self> {
        store
            .map(|store| Self::new(entities, store))
            .ok_or(StoreError::Failed)
    }

    /// Identity of the store this view reads from.
    #[inline]
    #[must_use]
    pub fn store_id(&self) -> StoreId {
        self.store
    }

    /// Checks if `entity` was captured.
    #[inline]
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    /// Number of captured entities.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Checks if nothing was captured.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterates over captured entities in unspecified order.
    pub fn iter(&self) -> hash_set::Iter<'_, Entity> {
        self.entities.iter()
    }

    /// Membership first, then store identity.
    fn guard(&self, store: StoreId, entity: Entity, component: &'static str) -> StoreResult<()> {
        if !self.contains(entity) {
            return Err(StoreError::OutOfRange { entity, component });
        }
        if store != self.store {
            tracing::debug!(%entity, "view read against a foreign store");
            return Err(StoreError::Failed);
        }
        Ok(())
    }

    /// Reference to a member's `T`.
    ///
    /// # Errors
    ///
    /// - [`StoreError::OutOfRange`] if `entity` is not a member, or no longer
    ///   has a `T`.
    /// - [`StoreError::Failed`] if `store` is not the store this view was
    ///   built from.
    pub fn get<'s, T: Component>(&self, store: &'s Store, entity: Entity) -> StoreResult<&'s T> {
        self.guard(store.id(), entity, type_name::<T>())?;
        store.get::<T>(entity)
    }

    /// Mutable reference to a member's `T`.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub fn get_mut<'s, T: Component>(
        &self,
        store: &'s mut Store,
        entity: Entity,
    ) -> StoreResult<&'s mut T> {
        self.guard(store.id(), entity, type_name::<T>())?;
        store.get_mut::<T>(entity)
    }

    /// References to every component in `Q` of a member.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get), naming the first missing type.
    pub fn get_multiple<'s, Q: ComponentSet>(
        &self,
        store: &'s Store,
        entity: Entity,
    ) -> StoreResult<Q::Refs<'s>> {
        self.guard(store.id(), entity, type_name::<Q>())?;
        store.get_multiple::<Q>(entity)
    }

    /// Mutable references to every component in `Q` of a member.
    ///
    /// # Errors
    ///
    /// Same as [`Store::get_multiple_mut`], plus the membership and store
    /// checks of [`get`](Self::get).
    pub fn get_multiple_mut<'s, Q: ComponentSet>(
        &self,
        store: &'s mut Store,
        entity: Entity,
    ) -> StoreResult<Q::Muts<'s>> {
        self.guard(store.id(), entity, type_name::<Q>())?;
        store.get_multiple_mut::<Q>(entity)
    }
}

impl<'a> IntoIterator for &'a View {
    type Item = &'a Entity;
    type IntoIter = hash_set::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    struct Marker(u8);

    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    struct Tag;

    #[test]
    fn test_with_store_requires_store() {
        let store = Store::new();
        assert_eq!(
            View::with_store(HashSet::new(), None).err(),
            Some(StoreError::Failed)
        );
        let view = View::with_store(HashSet::new(), Some(&store)).unwrap();
        assert_eq!(view.store_id(), store.id());
        assert!(view.is_empty());
    }

    #[test]
    fn test_non_member_is_out_of_range() {
        let mut store = Store::new();
        let inside = store.create();
        let outside = store.create();
        store.insert(inside, Marker(1)).unwrap();

        let view = store.view::<(Marker,)>();
        store.insert(outside, Marker(2)).unwrap();

        assert_eq!(view.get::<Marker>(&store, inside), Ok(&Marker(1)));
        assert_eq!(
            view.get::<Marker>(&store, outside),
            Err(StoreError::out_of_range::<Marker>(outside))
        );
        // The store itself has it.
        assert_eq!(store.get::<Marker>(outside), Ok(&Marker(2)));
    }

    #[test]
    fn test_detached_member_fails_at_read() {
        let mut store = Store::new();
        let e = store.create();
        store.insert(e, Marker(1)).unwrap();

        let view = store.view::<(Marker,)>();
        store.erase::<Marker>(e).unwrap();

        assert!(view.contains(e));
        assert_eq!(
            view.get::<Marker>(&store, e),
            Err(StoreError::out_of_range::<Marker>(e))
        );
    }

    #[test]
    fn test_foreign_store_is_rejected() {
        let mut store = Store::new();
        let e = store.create();
        store.insert(e, Marker(1)).unwrap();
        let view = store.view::<(Marker,)>();

        let mut other = Store::new();
        let e2 = other.create();
        other.insert(e2, Marker(9)).unwrap();

        assert_eq!(view.get::<Marker>(&other, e), Err(StoreError::Failed));
    }

    #[test]
    fn test_get_mut_through_view() {
        let mut store = Store::new();
        let e = store.create();
        store.insert(e, Marker(1)).unwrap();
        store.insert(e, Tag).unwrap();

        let view = store.view::<(Marker, Tag)>();
        view.get_mut::<Marker>(&mut store, e).unwrap().0 = 5;

        let (marker, tag) = view.get_multiple::<(Marker, Tag)>(&store, e).unwrap();
        assert_eq!((*marker, *tag), (Marker(5), Tag));

        let (marker,) = view.get_multiple_mut::<(Marker,)>(&mut store, e).unwrap();
        marker.0 += 1;
        assert_eq!(store.get_cloned::<Marker>(e), Ok(Marker(6)));
    }

    #[test]
    fn test_iteration_is_restartable() {
        let mut store = Store::new();
        for i in 0..3 {
            let e = store.create();
            store.insert(e, Marker(i)).unwrap();
        }
        let view = store.view::<(Marker,)>();

        let first: HashSet<Entity> = view.iter().copied().collect();
        let second: HashSet<Entity> = (&view).into_iter().copied().collect();
        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
    }
}
