/*!
 * Registry Builder
 * Builder pattern for Registry construction
 */

use super::config::{MapStrategy, RegistryConfig};
use super::Registry;
use crate::cell::{BroadcastCell, CellFactory, CellKind};
use crate::core::errors::ConfigResult;
use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::Arc;

/// Builder for [`Registry`]
pub struct RegistryBuilder<K, V> {
    config: RegistryConfig,
    factory: Option<CellFactory<V>>,
    _key: PhantomData<fn() -> K>,
}

impl<K, V> RegistryBuilder<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    /// Start from the default configuration
    pub fn new() -> Self {
        Self {
            config: RegistryConfig::default(),
            factory: None,
            _key: PhantomData,
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: RegistryConfig) -> Self {
        self.config = config;
        self
    }

    /// Select the backing map
    pub fn with_strategy(mut self, strategy: MapStrategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    /// Set an explicit shard amount (sharded backend only)
    pub fn with_shard_amount(mut self, shard_amount: usize) -> Self {
        self.config.shard_amount = Some(shard_amount);
        self
    }

    /// Set the initial key capacity
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = capacity;
        self
    }

    /// Use a built-in cell variant for new entries
    pub fn with_cell_kind(mut self, kind: CellKind) -> Self {
        self.config.cell_kind = kind;
        self
    }

    /// Use a custom cell constructor; overrides the cell kind
    pub fn with_factory<F, C>(mut self, factory: F) -> Self
    where
        F: Fn() -> C + Send + Sync + 'static,
        C: BroadcastCell<V> + 'static,
    {
        self.factory = Some(Arc::new(move || Arc::new(factory()) as Arc<dyn BroadcastCell<V>>));
        self
    }

    /// Use an already type-erased factory
    pub fn with_shared_factory(mut self, factory: CellFactory<V>) -> Self {
        self.factory = Some(factory);
        self
    }

    /// Validate the configuration and build the registry
    pub fn build(self) -> ConfigResult<Registry<K, V>> {
        self.config.validate()?;
        let factory = self
            .factory
            .unwrap_or_else(|| self.config.cell_kind.factory());
        Ok(Registry::from_parts(&self.config, factory))
    }
}

impl<K, V> Default for RegistryBuilder<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
