//! # Component Sets
//!
//! Tuples of component types used as the type parameter of the multi-type
//! store operations (`all_of`, `any_of`, `emplace`, `get_multiple`, `view`).
//! Every operation walks the tuple left to right.

use std::any::TypeId;

use super::component::{Component, ComponentArray, ErasedArray};
use super::entity::Entity;
use super::store::Store;
use crate::error::{StoreError, StoreResult};

/// A tuple of component types, `()` through eight elements.
pub trait ComponentSet: 'static {
    /// Shared references to one entity's components, in tuple order.
    type Refs<'a>;
    /// Mutable references to one entity's components, in tuple order.
    type Muts<'a>;

    /// `TypeId`s of the members, in tuple order.
    fn type_ids() -> Vec<TypeId>;

    /// Checks if the entity has every member. `()` is vacuously true.
    fn all_of(store: &Store, entity: Entity) -> bool;

    /// Checks if the entity has at least one member. `()` is false.
    fn any_of(store: &Store, entity: Entity) -> bool;

    /// Borrows every member of the entity.
    ///
    /// # Errors
    ///
    /// [`StoreError::OutOfRange`] naming the first missing type.
    fn fetch(store: &Store, entity: Entity) -> StoreResult<Self::Refs<'_>>;

    /// Mutably borrows every member of the entity.
    ///
    /// # Errors
    ///
    /// [`StoreError::Failed`] if a type repeats, otherwise
    /// [`StoreError::OutOfRange`] naming the first missing type.
    fn fetch_mut(store: &mut Store, entity: Entity) -> StoreResult<Self::Muts<'_>>;
}

/// A component set whose members can be default-constructed.
pub trait DefaultComponents: ComponentSet {
    /// Inserts a default value of every member, stopping at the first
    /// failure. Insertions made before the failure are kept.
    ///
    /// # Errors
    ///
    /// The first member's insertion error.
    fn emplace(store: &mut Store, entity: Entity) -> StoreResult<()>;
}

fn has_duplicates(ids: &[TypeId]) -> bool {
    ids.iter()
        .enumerate()
        .any(|(i, id)| ids[i + 1..].contains(id))
}

fn downcast_mut<T: Component>(
    array: Option<&mut Box<dyn ErasedArray>>,
    entity: Entity,
) -> StoreResult<&mut T> {
    array
        .and_then(|array| array.as_any_mut().downcast_mut::<ComponentArray<T>>())
        .ok_or_else(|| StoreError::out_of_range::<T>(entity))?
        .get_mut(entity)
}

impl ComponentSet for () {
    type Refs<'a> = ();
    type Muts<'a> = ();

    fn type_ids() -> Vec<TypeId> {
        Vec::new()
    }

    fn all_of(_store: &Store, _entity: Entity) -> bool {
        true
    }

    fn any_of(_store: &Store, _entity: Entity) -> bool {
        false
    }

    fn fetch(_store: &Store, _entity: Entity) -> StoreResult<()> {
        Ok(())
    }

    fn fetch_mut(_store: &mut Store, _entity: Entity) -> StoreResult<()> {
        Ok(())
    }
}

impl DefaultComponents for () {
    fn emplace(_store: &mut Store, _entity: Entity) -> StoreResult<()> {
        Ok(())
    }
}

macro_rules! component_set_tuple {
    ($head:ident $head_slot:ident) => {
        impl_component_set_tuple!($head $head_slot);
    };
    ($head:ident $head_slot:ident, $( $tail:ident $tail_slot:ident ),*) => {
        impl_component_set_tuple!($head $head_slot, $( $tail $tail_slot ),*);
        component_set_tuple!($( $tail $tail_slot ),*);
    };
}

macro_rules! impl_component_set_tuple {
    ( $( $ty:ident $slot:ident ),* ) => {
        impl<$( $ty: Component ),*> ComponentSet for ($( $ty, )*) {
            type Refs<'a> = ($( &'a $ty, )*);
            type Muts<'a> = ($( &'a mut $ty, )*);

            fn type_ids() -> Vec<TypeId> {
                vec![$( TypeId::of::<$ty>() ),*]
            }

            fn all_of(store: &Store, entity: Entity) -> bool {
                $( store.contains::<$ty>(entity) )&&*
            }

            fn any_of(store: &Store, entity: Entity) -> bool {
                $( store.contains::<$ty>(entity) )||*
            }

            fn fetch(store: &Store, entity: Entity) -> StoreResult<Self::Refs<'_>> {
                Ok(($( store.get::<$ty>(entity)?, )*))
            }

            #[allow(clippy::needless_continue)]
            fn fetch_mut(store: &mut Store, entity: Entity) -> StoreResult<Self::Muts<'_>> {
                if has_duplicates(&Self::type_ids()) {
                    return Err(StoreError::Failed);
                }

                $( let mut $slot: Option<&mut Box<dyn ErasedArray>> = None; )*
                for (type_id, array) in store.arrays_mut() {
                    $(
                        if *type_id == TypeId::of::<$ty>() {
                            $slot = Some(array);
                            continue;
                        }
                    )*
                }

                Ok(($( downcast_mut::<$ty>($slot, entity)?, )*))
            }
        }

        impl<$( $ty: Component + Default ),*> DefaultComponents for ($( $ty, )*) {
            fn emplace(store: &mut Store, entity: Entity) -> StoreResult<()> {
                $( store.insert::<$ty>(entity, $ty::default())?; )*
                Ok(())
            }
        }
    };
}

component_set_tuple!(A a, B b, C c, D d, E e, F f, G g, H h);
