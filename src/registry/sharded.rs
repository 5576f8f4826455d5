/*!
 * Sharded Cell Store
 *
 * `DashMap` partitions keys across independently locked shards, so
 * get-or-create on different keys rarely contends.
 *
 * Get-or-create probes with a shard read lock first; on a miss the entry API
 * holds the shard write lock across check and insert, which makes the
 * absent -> present transition atomic.
 */

use super::store::CellStore;
use crate::cell::SharedCell;
use ahash::RandomState;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;

/// Shard-locked map of cells
pub struct ShardedStore<K, V>
where
    K: Eq + Hash,
{
    map: DashMap<K, SharedCell<V>, RandomState>,
}

impl<K, V> ShardedStore<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    /// `shard_amount` must be a power of two greater than one
    pub fn new(capacity: usize, shard_amount: usize) -> Self {
        Self {
            map: DashMap::with_capacity_and_hasher_and_shard_amount(
                capacity,
                RandomState::new(),
                shard_amount,
            ),
        }
    }
}

impl<K, V> CellStore<K, V> for ShardedStore<K, V>
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
        self.map.get(key).map(|entry| Arc::clone(entry.value()))
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

        match self.map.entry(key.to_owned()) {
            Entry::Occupied(entry) => (Arc::clone(entry.get()), true),
            Entry::Vacant(entry) => {
                let cell = create();
                entry.insert(Arc::clone(&cell));
                (cell, false)
            }
        }
    }

    fn insert(&self, key: K, cell: SharedCell<V>) -> Option<SharedCell<V>> {
        self.map.insert(key, cell)
    }

    fn remove<Q>(&self, key: &Q) -> Option<SharedCell<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.remove(key).map(|(_, cell)| cell)
    }

    #[inline]
    fn len(&self) -> usize {
        self.map.len()
    }

    fn snapshot(&self) -> Vec<(K, SharedCell<V>)> {
        self.map
            .iter()
            .map(|entry| (entry.key().clone(), Arc::clone(entry.value())))
            .collect()
    }

    fn clear(&self) {
        self.map.clear();
    }
}
