//! # Entity Component Store
//!
//! A sparse set ECS storage engine.
//!
//! ## Design Philosophy
//!
//! - Entities are plain integers, recycled oldest-first
//! - Each component type owns one dense array, compacted by swap-with-last
//! - Arrays of different types live behind one type-erased interface
//! - Views are snapshots and never borrow the store

mod component;
mod entity;
mod layout;
mod query;
mod store;
mod view;

pub use component::{Component, ComponentArray, ErasedArray};
pub use entity::{Entity, EntityStore};
pub use layout::{Compressed, MemoryLayout, Removal};
pub use query::{ComponentSet, DefaultComponents};
pub use store::{Store, StoreId};
pub use view::View;
