//! # Store Error Types
//!
//! All errors that can occur in the entity/component store.

use thiserror::Error;

use crate::ecs::Entity;

/// Errors that can occur in the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The entity, or the entity/component pairing, does not exist.
    #[error("entity {0} not found")]
    NotFound(Entity),

    /// The entity already carries a component of this type.
    #[error("entity {entity} already has component {component}")]
    Exists {
        /// The entity the insert targeted.
        entity: Entity,
        /// Type name of the duplicate component.
        component: &'static str,
    },

    /// A component array is full.
    #[error("component array full: capacity {capacity}")]
    MaxEntities {
        /// The capacity bound that was hit.
        capacity: usize,
    },

    /// A composite operation failed in one of its sub-operations.
    #[error("operation failed")]
    Failed,

    /// Typed read of a component that is not attached, or of an entity
    /// outside a view.
    #[error("component {component} out of range for entity {entity}")]
    OutOfRange {
        /// The entity that was read.
        entity: Entity,
        /// Type name of the requested component.
        component: &'static str,
    },
}

impl StoreError {
    /// Builds an [`StoreError::OutOfRange`] for component type `T`.
    #[inline]
    #[must_use]
    pub fn out_of_range<T: ?Sized>(entity: Entity) -> Self {
        Self::OutOfRange {
            entity,
            component: std::any::type_name::<T>(),
        }
    }

    /// Builds an [`StoreError::Exists`] for component type `T`.
    #[inline]
    #[must_use]
    pub fn exists<T: ?Sized>(entity: Entity) -> Self {
        Self::Exists {
            entity,
            component: std::any::type_name::<T>(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised while loading a [`StoreConfig`](crate::StoreConfig).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The TOML source could not be parsed.
    #[error("invalid configuration: {0}")]
    Parse(String),

    /// Capacity must allow at least one entity.
    #[error("invalid capacity: {0}")]
    InvalidCapacity(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StoreError::NotFound(Entity::new(7));
        assert_eq!(err.to_string(), "entity 7 not found");

        let err = StoreError::MaxEntities { capacity: 4 };
        assert_eq!(err.to_string(), "component array full: capacity 4");
    }

    #[test]
    fn test_typed_constructors() {
        let err = StoreError::exists::<u32>(Entity::new(1));
        assert_eq!(
            err,
            StoreError::Exists {
                entity: Entity::new(1),
                component: "u32",
            }
        );
        assert!(matches!(
            StoreError::out_of_range::<u32>(Entity::new(1)),
            StoreError::OutOfRange { component: "u32", .. }
        ));
    }
}
