/*!
 * Locked Cell Store
 *
 * Single `parking_lot::RwLock<HashMap>` guarding the whole key space.
 *
 * Get-or-create is double-checked: probe under the read lock (the common hit
 * path), and only on a miss take the write lock, probe again, then insert.
 */

use super::store::CellStore;
use crate::cell::SharedCell;
use ahash::RandomState;
use parking_lot::RwLock;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

/// Reader/writer-locked map of cells
pub struct LockedStore<K, V> {
    map: RwLock<HashMap<K, SharedCell<V>, RandomState>>,
}

impl<K, V> LockedStore<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    pub fn new(capacity: usize) -> Self {
        Self {
            map: RwLock::new(HashMap::with_capacity_and_hasher(
                capacity,
                RandomState::new(),
            )),
        }
    }
}

impl<K, V> CellStore<K, V> for LockedStore<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    #[inline]
    fn get<Q>(&self, key: &Q) -> Option<SharedCell<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.read().get(key).cloned()
    }

    fn get_or_insert_with<Q, F>(&self, key: &Q, create: F) -> (SharedCell<V>, bool)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
        F: FnOnce() -> SharedCell<V>,
    {
        if let Some(cell) = self.get(key) {
            return (cell, true);
        }

        let mut map = self.map.write();
        // Another writer may have won between the two locks
        if let Some(cell) = map.get(key) {
            return (Arc::clone(cell), true);
        }

        let cell = create();
        map.insert(key.to_owned(), Arc::clone(&cell));
        (cell, false)
    }

    fn insert(&self, key: K, cell: SharedCell<V>) -> Option<SharedCell<V>> {
        self.map.write().insert(key, cell)
    }

    fn remove<Q>(&self, key: &Q) -> Option<SharedCell<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.write().remove(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.map.read().len()
    }

    fn snapshot(&self) -> Vec<(K, SharedCell<V>)> {
        self.map
            .read()
            .iter()
            .map(|(key, cell)| (key.clone(), Arc::clone(cell)))
            .collect()
    }

    fn clear(&self) {
        self.map.write().clear();
    }
}
