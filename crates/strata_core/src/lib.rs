//! # STRATA Core Engine
//!
//! In-memory entity/component store designed for:
//! - Many short-lived entities with handle recycling
//! - O(1) attach, detach and lookup per component
//! - Cache-dense iteration over one component type
//!
//! ## Architecture Rules
//!
//! 1. **Dense storage** - Each component type is packed into one gap-free array
//! 2. **Explicit results** - Every mutator returns a [`StoreResult`]
//! 3. **No ambient state** - Stores are constructed explicitly, never global
//!
//! ## Example
//!
//! ```rust
//! use strata_core::{Store, StoreConfig};
//!
//! #[derive(Clone, Copy, Debug, Default, PartialEq)]
//! struct Position { x: f32, y: f32 }
//!
//! #[derive(Clone, Copy, Debug, Default, PartialEq)]
//! struct Velocity { x: f32, y: f32 }
//!
//! let mut store = Store::with_config(StoreConfig::small());
//! let e = store.create();
//! store.insert(e, Position { x: 0.0, y: 0.0 }).unwrap();
//! store.insert(e, Velocity { x: 1.0, y: 2.0 }).unwrap();
//!
//! let view = store.view::<(Position, Velocity)>();
//! for &entity in &view {
//!     let (pos, vel) = view.get_multiple_mut::<(Position, Velocity)>(&mut store, entity).unwrap();
//!     pos.x += vel.x;
//!     pos.y += vel.y;
//! }
//! assert_eq!(store.get::<Position>(e), Ok(&Position { x: 1.0, y: 2.0 }));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod ecs;
pub mod error;
pub mod sync;

pub use config::{StoreConfig, DEFAULT_CAPACITY};
pub use ecs::{
    Component, ComponentArray, ComponentSet, Compressed, DefaultComponents, Entity,
    EntityStore, ErasedArray, MemoryLayout, Removal, Store, StoreId, View,
};
pub use error::{ConfigError, StoreError, StoreResult};
pub use sync::SharedStore;
