/*!
 * Registry Configuration
 *
 * Runtime selection of the backing map and cell variant.
 *
 * # Shard Sizing
 *
 * The sharded backend gets a CPU-proportional, power-of-two shard amount
 * (fast modulo via `hash & (n - 1)`), clamped to `[MIN_SHARDS, MAX_SHARDS]`.
 */

use crate::cell::CellKind;
use crate::core::errors::{ConfigError, ConfigResult};
use crate::core::limits::{
    DEFAULT_REGISTRY_CAPACITY, ENV_CAPACITY, ENV_CELL_KIND, ENV_MAP_STRATEGY, ENV_SHARDS,
    MAX_SHARDS, MIN_SHARDS,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Backing map selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapStrategy {
    /// Single `RwLock<HashMap>` with double-checked get-or-create
    Locked,
    /// `DashMap` with per-shard locking and entry-based get-or-create
    Sharded,
    /// Sharded when more than one CPU is available, locked otherwise
    #[default]
    Auto,
}

impl MapStrategy {
    /// Resolve `Auto` for the current machine
    pub fn resolve(self) -> MapStrategy {
        match self {
            MapStrategy::Auto => {
                if cpu_count() > 1 {
                    MapStrategy::Sharded
                } else {
                    MapStrategy::Locked
                }
            }
            other => other,
        }
    }
}

impl FromStr for MapStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "locked" | "rwlock" => Ok(MapStrategy::Locked),
            "sharded" | "dashmap" => Ok(MapStrategy::Sharded),
            "auto" => Ok(MapStrategy::Auto),
            other => Err(ConfigError::InvalidStrategy(other.to_string())),
        }
    }
}

/// Expected contention, used to size shards when no amount is given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentionProfile {
    /// Many threads hammering few keys: 4x CPU shards
    High,
    /// 2x CPU shards
    #[default]
    Medium,
    /// 1x CPU shards
    Low,
}

impl ContentionProfile {
    /// Shard amount for this profile on the current machine
    #[inline]
    pub fn shard_amount(self) -> usize {
        let multiplier = match self {
            ContentionProfile::High => 4,
            ContentionProfile::Medium => 2,
            ContentionProfile::Low => 1,
        };

        (cpu_count() * multiplier)
            .next_power_of_two()
            .clamp(MIN_SHARDS, MAX_SHARDS)
    }
}

/// Number of CPUs available to this process
#[inline]
pub fn cpu_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or_else(|_| {
            tracing::warn!("Failed to detect CPU count, defaulting to 8");
            8
        })
}

/// Registry configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Backing map
    pub strategy: MapStrategy,
    /// Explicit shard amount for the sharded backend (power of two, >= 2)
    pub shard_amount: Option<usize>,
    /// Initial key capacity
    pub capacity: usize,
    /// Variant produced by the default cell factory
    pub cell_kind: CellKind,
    /// Shard sizing hint when `shard_amount` is unset
    pub contention: ContentionProfile,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            strategy: MapStrategy::Auto,
            shard_amount: None,
            capacity: DEFAULT_REGISTRY_CAPACITY,
            cell_kind: CellKind::Repeatable,
            contention: ContentionProfile::Medium,
        }
    }
}

impl RegistryConfig {
    /// Configuration for few concurrent callers
    pub fn low_contention() -> Self {
        Self {
            strategy: MapStrategy::Locked,
            contention: ContentionProfile::Low,
            ..Self::default()
        }
    }

    /// Configuration for many threads coalescing on a hot key set
    pub fn high_contention() -> Self {
        Self {
            strategy: MapStrategy::Sharded,
            capacity: 64,
            contention: ContentionProfile::High,
            ..Self::default()
        }
    }

    /// Check values that would otherwise panic inside the backing map
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(amount) = self.shard_amount {
            if amount < 2 || !amount.is_power_of_two() {
                return Err(ConfigError::InvalidShardAmount(amount));
            }
        }
        Ok(())
    }

    /// Shard amount the sharded backend will use
    pub fn resolved_shard_amount(&self) -> usize {
        self.shard_amount
            .unwrap_or_else(|| self.contention.shard_amount())
    }

    /// Load from `RENDEZVOUS_*` environment variables on top of defaults
    ///
    /// Environment variables:
    /// - RENDEZVOUS_MAP_STRATEGY: locked | sharded | auto
    /// - RENDEZVOUS_SHARDS: explicit shard amount
    /// - RENDEZVOUS_CAPACITY: initial key capacity
    /// - RENDEZVOUS_CELL_KIND: repeatable | once
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a caller-supplied variable source
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_MAP_STRATEGY) {
            config.strategy = value.parse()?;
        }
        if let Some(value) = lookup(ENV_SHARDS) {
            config.shard_amount = Some(parse_number(ENV_SHARDS, &value)?);
        }
        if let Some(value) = lookup(ENV_CAPACITY) {
            config.capacity = parse_number(ENV_CAPACITY, &value)?;
        }
        if let Some(value) = lookup(ENV_CELL_KIND) {
            config.cell_kind = value.parse()?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON object; missing fields take their defaults
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

fn parse_number(name: &str, value: &str) -> ConfigResult<usize> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            name: name.to_string(),
            value: value.to_string(),
        })
}
