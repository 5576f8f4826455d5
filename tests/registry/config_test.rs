/*!
 * Registry Configuration Tests
 * Builder validation and environment loading
 */

use pretty_assertions::assert_eq;
use rendezvous::cell::{BroadcastCell, CellKind, OneShotCell};
use rendezvous::core::errors::ConfigError;
use rendezvous::registry::{MapStrategy, Registry, RegistryConfig, StringRegistry};
use serial_test::serial;

#[test]
fn test_builder_rejects_bad_shard_amount() {
    let result = Registry::<String, u8>::builder()
        .with_strategy(MapStrategy::Sharded)
        .with_shard_amount(6)
        .build();

    assert_eq!(result.unwrap_err(), ConfigError::InvalidShardAmount(6));
}

#[test]
fn test_builder_cell_kind_and_factory() {
    let registry: StringRegistry<u8> = Registry::builder()
        .with_strategy(MapStrategy::Locked)
        .with_capacity(2)
        .with_cell_kind(CellKind::Once)
        .build()
        .unwrap();
    assert_eq!(registry.strategy(), MapStrategy::Locked);
    assert_eq!(registry.get_or_create("k").0.name(), "once");

    // A custom factory wins over the configured kind
    let registry: StringRegistry<u8> = Registry::builder()
        .with_cell_kind(CellKind::Repeatable)
        .with_factory(OneShotCell::new)
        .build()
        .unwrap();
    assert_eq!(registry.get_or_create("k").0.name(), "once");
}

#[test]
fn test_auto_strategy_resolves() {
    let registry = StringRegistry::<u8>::new();
    assert_ne!(registry.strategy(), MapStrategy::Auto);
}

#[test]
#[serial]
fn test_from_env_defaults() {
    for name in [
        "RENDEZVOUS_MAP_STRATEGY",
        "RENDEZVOUS_SHARDS",
        "RENDEZVOUS_CAPACITY",
        "RENDEZVOUS_CELL_KIND",
    ] {
        std::env::remove_var(name);
    }

    assert_eq!(RegistryConfig::from_env().unwrap(), RegistryConfig::default());
}

#[test]
#[serial]
fn test_from_env_overrides() {
    std::env::set_var("RENDEZVOUS_MAP_STRATEGY", "sharded");
    std::env::set_var("RENDEZVOUS_SHARDS", "32");
    std::env::set_var("RENDEZVOUS_CELL_KIND", "once");

    let config = RegistryConfig::from_env();

    std::env::remove_var("RENDEZVOUS_MAP_STRATEGY");
    std::env::remove_var("RENDEZVOUS_SHARDS");
    std::env::remove_var("RENDEZVOUS_CELL_KIND");

    let config = config.unwrap();
    assert_eq!(config.strategy, MapStrategy::Sharded);
    assert_eq!(config.shard_amount, Some(32));
    assert_eq!(config.cell_kind, CellKind::Once);

    let registry = StringRegistry::<u8>::with_config(config).unwrap();
    assert_eq!(registry.strategy(), MapStrategy::Sharded);
    assert_eq!(registry.get_or_create("k").0.name(), "once");
}

#[test]
fn test_config_json_round_trip() {
    let config = RegistryConfig::high_contention();
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(RegistryConfig::from_json(&json).unwrap(), config);
}
