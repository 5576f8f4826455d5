/*!
 * Limits and Constants
 *
 * Centralized tunables for cells and registries.
 *
 * - Performance-critical constants are marked with [PERF]
 */

use std::time::Duration;

// =============================================================================
// CELL WAITING
// =============================================================================

/// Spin iterations before a waiter parks on the condvar
/// [PERF] Covers the common case where the broadcast is already in flight
pub const WAIT_SPIN_LIMIT: u32 = 64;

// =============================================================================
// REGISTRY SIZING
// =============================================================================

/// Initial key capacity of a fresh registry
pub const DEFAULT_REGISTRY_CAPACITY: usize = 8;

/// Lower bound for computed shard amounts
/// Avoids degenerate sharding on 1-2 core machines
pub const MIN_SHARDS: usize = 8;

/// Upper bound for computed shard amounts
/// [PERF] Diminishing returns past this point, memory grows linearly
pub const MAX_SHARDS: usize = 512;

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Backing map selection (`locked`, `sharded`, `auto`)
pub const ENV_MAP_STRATEGY: &str = "RENDEZVOUS_MAP_STRATEGY";

/// Explicit shard amount for the sharded backend
pub const ENV_SHARDS: &str = "RENDEZVOUS_SHARDS";

/// Initial key capacity
pub const ENV_CAPACITY: &str = "RENDEZVOUS_CAPACITY";

/// Cell variant created by the default factory (`repeatable`, `once`)
pub const ENV_CELL_KIND: &str = "RENDEZVOUS_CELL_KIND";

/// Switch tracing output to JSON (`1` or `true`)
pub const ENV_TRACE_JSON: &str = "RENDEZVOUS_TRACE_JSON";

// =============================================================================
// OBSERVABILITY
// =============================================================================

/// Waits longer than this are logged at warn level by `WaitSpan`
pub const SLOW_WAIT_THRESHOLD: Duration = Duration::from_millis(100);
