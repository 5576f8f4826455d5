/*!
 * Cell Registry
 *
 * Concurrent key -> cell map with atomic get-or-create.
 *
 * # Architecture
 *
 * A registry owns the key space and the create lifecycle; cells it hands out
 * are shared handles that stay valid after their entry is deleted. Cell
 * operations never take the registry's locks.
 *
 * Two interchangeable backends sit behind [`MapStrategy`]:
 * - **Locked**: one `RwLock<HashMap>`, double-checked get-or-create
 * - **Sharded**: `DashMap`, per-shard locking via the entry API
 *
 * # Iteration Policy
 *
 * [`Registry::range`] is snapshot-then-iterate: entries are copied out before
 * the first callback, so the visitor may call back into the registry and
 * never observes mutations made during the visit. The sharded backend copies
 * shard by shard, so the snapshot is not a single atomic cut across shards.
 *
 * # Key Domains
 *
 * [`StringRegistry`] and [`IntRegistry`] are plain aliases; lookups accept the
 * borrowed form (`&str` for `String` keys) so probing never allocates.
 */

mod builder;
mod config;
mod locked;
mod sharded;
mod stats;
mod store;

pub use builder::RegistryBuilder;
pub use config::{cpu_count, ContentionProfile, MapStrategy, RegistryConfig};
pub use locked::LockedStore;
pub use sharded::ShardedStore;
pub use stats::RegistryStats;
pub use store::CellStore;

use crate::cell::{default_factory, CellFactory, CellKind, SharedCell};
use crate::core::errors::ConfigResult;
use stats::StatCounters;
use std::borrow::Borrow;
use std::hash::Hash;
use std::ops::ControlFlow;
use std::sync::Arc;
use store::StoreImpl;
use tracing::debug;

/// Registry keyed by strings
pub type StringRegistry<V> = Registry<String, V>;

/// Registry keyed by integers
pub type IntRegistry<V> = Registry<i64, V>;

/// Concurrent key -> cell map
///
/// # Examples
///
/// ```
/// use rendezvous::cell::BroadcastCell;
/// use rendezvous::registry::StringRegistry;
/// use std::sync::Arc;
///
/// let registry = StringRegistry::<u32>::new();
///
/// let (cell, existed) = registry.get_or_create("answer");
/// assert!(!existed);
///
/// // Any other caller gets the very same cell
/// let (same, existed) = registry.get_or_create("answer");
/// assert!(existed);
/// assert!(Arc::ptr_eq(&cell, &same));
///
/// cell.broadcast(42);
/// assert_eq!(*same.wait(), 42);
///
/// registry.delete("answer");
/// assert!(registry.get("answer").is_none());
/// ```
pub struct Registry<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    store: StoreImpl<K, V>,
    factory: CellFactory<V>,
    stats: StatCounters,
}

impl<K, V> Registry<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    /// Empty registry creating repeatable cells
    pub fn new() -> Self {
        Self::from_parts(&RegistryConfig::default(), default_factory())
    }

    /// Empty registry creating cells with `factory`
    ///
    /// The factory runs while the creating caller holds the map's write lock
    /// (or shard lock); it must not call back into this registry.
    pub fn with_factory<F>(factory: F) -> Self
    where
        F: Fn() -> SharedCell<V> + Send + Sync + 'static,
    {
        Self::from_parts(&RegistryConfig::default(), Arc::new(factory))
    }

    /// Empty registry creating built-in cells of `kind`
    pub fn with_kind(kind: CellKind) -> Self {
        Self::from_parts(&RegistryConfig::default(), kind.factory())
    }

    /// Empty registry from a validated configuration
    pub fn with_config(config: RegistryConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::from_parts(&config, config.cell_kind.factory()))
    }

    /// Start building a registry
    pub fn builder() -> RegistryBuilder<K, V> {
        RegistryBuilder::new()
    }

    pub(crate) fn from_parts(config: &RegistryConfig, factory: CellFactory<V>) -> Self {
        let store = StoreImpl::new(
            config.strategy,
            config.capacity,
            config.resolved_shard_amount(),
        );
        debug!(
            strategy = ?store.strategy(),
            capacity = config.capacity,
            "registry created"
        );

        Self {
            store,
            factory,
            stats: StatCounters::default(),
        }
    }

    /// Return the cell for `key`, creating it if absent
    ///
    /// The boolean is `true` when the cell already existed. Among concurrent
    /// calls on an absent key exactly one sees `false`, and all of them get
    /// the same cell.
    pub fn get_or_create<Q>(&self, key: &Q) -> (SharedCell<V>, bool)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        let (cell, existed) = self.store.get_or_insert_with(key, || (self.factory)());
        self.stats.record_lookup(existed);
        if !existed {
            self.stats.record_creation();
            debug!(cell = cell.name(), "cell created");
        }
        (cell, existed)
    }

    /// Non-mutating lookup
    pub fn get<Q>(&self, key: &Q) -> Option<SharedCell<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let cell = self.store.get(key);
        self.stats.record_lookup(cell.is_some());
        cell
    }

    /// Install `cell` under `key`, returning the previous cell
    ///
    /// With `None` nothing is written: this is a plain lookup that still
    /// returns the current cell.
    pub fn put(&self, key: K, cell: Option<SharedCell<V>>) -> Option<SharedCell<V>> {
        match cell {
            Some(cell) => self.store.insert(key, cell),
            None => self.store.get(&key),
        }
    }

    /// Forget the mapping for `key`
    ///
    /// Handles already held by callers stay valid. Returns the forgotten cell.
    pub fn delete<Q>(&self, key: &Q) -> Option<SharedCell<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let removed = self.store.remove(key);
        if removed.is_some() {
            self.stats.record_deletion();
            debug!("cell deleted");
        }
        removed
    }

    /// Whether `key` is currently mapped
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.store.get(key).is_some()
    }

    /// Current key count (best-effort under concurrent mutation)
    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether no keys are mapped
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visit a snapshot of the entries in unspecified order
    ///
    /// Stops as soon as `visit` returns [`ControlFlow::Break`].
    pub fn range<F>(&self, mut visit: F)
    where
        F: FnMut(&K, &SharedCell<V>) -> ControlFlow<()>,
    {
        for (key, cell) in self.store.snapshot() {
            if visit(&key, &cell).is_break() {
                break;
            }
        }
    }

    /// Copy of every entry
    pub fn snapshot(&self) -> Vec<(K, SharedCell<V>)> {
        self.store.snapshot()
    }

    /// Forget every mapping
    pub fn clear(&self) {
        self.store.clear();
    }

    /// Backend in use (never `Auto`)
    pub fn strategy(&self) -> MapStrategy {
        self.store.strategy()
    }

    /// Counter snapshot
    pub fn stats(&self) -> RegistryStats {
        self.stats.snapshot()
    }
}

impl<K, V> Default for Registry<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> std::fmt::Debug for Registry<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("strategy", &self.strategy())
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
