//! # Shared Store Handle
//!
//! One `parking_lot` mutex per store instance.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::ecs::Store;

/// Cloneable handle to a store guarded by one exclusive lock.
///
/// ## Usage
///
/// ```rust
/// use strata_core::{SharedStore, Store};
///
/// let shared = SharedStore::new(Store::new());
///
/// let worker = {
///     let shared = shared.clone();
///     std::thread::spawn(move || {
///         shared.write(|store| {
///             let e = store.create();
///             store.insert(e, 1_u32)
///         })
///     })
/// };
///
/// worker.join().unwrap().unwrap();
/// assert_eq!(shared.read(|store| store.component_count::<u32>()), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SharedStore {
    inner: Arc<Mutex<Store>>,
}

impl SharedStore {
    /// Wraps a store.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Blocks until the store is available.
    #[inline]
    pub fn lock(&self) -> MutexGuard<'_, Store> {
        self.inner.lock()
    }

    /// Returns the store if no other handle holds the lock.
    #[inline]
    pub fn try_lock(&self) -> Option<MutexGuard<'_, Store>> {
        self.inner.try_lock()
    }

    /// Runs `f` with shared access under the lock.
    pub fn read<R>(&self, f: impl FnOnce(&Store) -> R) -> R {
        let guard = self.inner.lock();
        f(&guard)
    }

    /// Runs `f` with exclusive access under the lock.
    pub fn write<R>(&self, f: impl FnOnce(&mut Store) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }

    /// Unwraps the store if this is the last handle.
    ///
    /// # Errors
    ///
    /// Returns the handle unchanged while other clones exist.
    pub fn into_inner(self) -> Result<Store, Self> {
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| Self { inner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_concurrent_writers() {
        let shared = SharedStore::new(Store::new());

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for i in 0..50_u32 {
                        shared.write(|store| {
                            let e = store.create();
                            store.insert(e, t * 1_000 + i).unwrap();
                        });
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let store = shared.into_inner().unwrap();
        assert_eq!(store.len(), 200);
        assert_eq!(store.component_count::<u32>(), 200);
    }

    #[test]
    fn test_try_lock_while_held() {
        let shared = SharedStore::default();
        let guard = shared.lock();
        assert!(shared.try_lock().is_none());
        drop(guard);
        assert!(shared.try_lock().is_some());
    }

    #[test]
    fn test_into_inner_with_clones() {
        let shared = SharedStore::default();
        let other = shared.clone();
        let shared = shared.into_inner().unwrap_err();
        drop(other);
        assert!(shared.into_inner().is_ok());
    }
}
