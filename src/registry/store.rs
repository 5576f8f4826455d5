/*!
 * Cell Store Abstraction
 *
 * The key -> cell map behind a registry.
 *
 * # Design: Trait for Implementations, Enum for Dispatch
 *
 * Both backends implement [`CellStore`]; the registry holds a [`StoreImpl`]
 * enum instead of `Box<dyn CellStore>` so the lookup-hit path is a direct,
 * inlinable call. The trait's generic methods would not be object-safe anyway.
 */

use super::config::MapStrategy;
use super::locked::LockedStore;
use super::sharded::ShardedStore;
use crate::cell::SharedCell;
use std::borrow::Borrow;
use std::hash::Hash;

/// Operations a backing map must provide
///
/// Every method must be linearizable with respect to the others.
pub trait CellStore<K, V>: Send + Sync
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    /// Non-mutating lookup
    fn get<Q>(&self, key: &Q) -> Option<SharedCell<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized;

    /// Return the mapped cell, or install `create()` if absent
    ///
    /// The boolean is `true` when the cell already existed. `create` runs at
    /// most once, and only for the caller that installs the cell.
    fn get_or_insert_with<Q, F>(&self, key: &Q, create: F) -> (SharedCell<V>, bool)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
        F: FnOnce() -> SharedCell<V>;

    /// Unconditional install, returning the previous cell
    fn insert(&self, key: K, cell: SharedCell<V>) -> Option<SharedCell<V>>;

    /// Forget the mapping, returning the removed cell
    fn remove<Q>(&self, key: &Q) -> Option<SharedCell<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized;

    /// Current key count
    fn len(&self) -> usize;

    /// Copy of all entries
    fn snapshot(&self) -> Vec<(K, SharedCell<V>)>;

    /// Drop every mapping
    fn clear(&self);
}

/// Backend selected at construction (enum dispatch for zero overhead)
pub(crate) enum StoreImpl<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    Locked(LockedStore<K, V>),
    Sharded(ShardedStore<K, V>),
}

impl<K, V> StoreImpl<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    /// Build the backend for an already-resolved strategy
    pub(crate) fn new(strategy: MapStrategy, capacity: usize, shard_amount: usize) -> Self {
        match strategy.resolve() {
            MapStrategy::Sharded => Self::Sharded(ShardedStore::new(capacity, shard_amount)),
            MapStrategy::Locked | MapStrategy::Auto => Self::Locked(LockedStore::new(capacity)),
        }
    }

    pub(crate) fn strategy(&self) -> MapStrategy {
        match self {
            Self::Locked(_) => MapStrategy::Locked,
            Self::Sharded(_) => MapStrategy::Sharded,
        }
    }

    #[inline(always)]
    pub(crate) fn get<Q>(&self, key: &Q) -> Option<SharedCell<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self {
            Self::Locked(s) => s.get(key),
            Self::Sharded(s) => s.get(key),
        }
    }

    #[inline(always)]
    pub(crate) fn get_or_insert_with<Q, F>(&self, key: &Q, create: F) -> (SharedCell<V>, bool)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
        F: FnOnce() -> SharedCell<V>,
    {
        match self {
            Self::Locked(s) => s.get_or_insert_with(key, create),
            Self::Sharded(s) => s.get_or_insert_with(key, create),
        }
    }

    #[inline]
    pub(crate) fn insert(&self, key: K, cell: SharedCell<V>) -> Option<SharedCell<V>> {
        match self {
            Self::Locked(s) => s.insert(key, cell),
            Self::Sharded(s) => s.insert(key, cell),
        }
    }

    #[inline]
    pub(crate) fn remove<Q>(&self, key: &Q) -> Option<SharedCell<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self {
            Self::Locked(s) => s.remove(key),
            Self::Sharded(s) => s.remove(key),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        match self {
            Self::Locked(s) => s.len(),
            Self::Sharded(s) => s.len(),
        }
    }

    pub(crate) fn snapshot(&self) -> Vec<(K, SharedCell<V>)> {
        match self {
            Self::Locked(s) => s.snapshot(),
            Self::Sharded(s) => s.snapshot(),
        }
    }

    pub(crate) fn clear(&self) {
        match self {
            Self::Locked(s) => s.clear(),
            Self::Sharded(s) => s.clear(),
        }
    }
}
