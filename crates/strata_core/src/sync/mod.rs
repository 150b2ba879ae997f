//! # External Synchronization
//!
//! The store has no internal locking. Applications that share one store
//! between threads serialize every call through a single exclusive lock:
//!
//! ```text
//! Thread 1:  lock -> insert/erase -> unlock
//! Thread 2:  lock -> view + reads  -> unlock
//! ```
//!
//! [`SharedStore`] packages that lock.

mod shared;

pub use shared::SharedStore;
