/*!
 * Rendezvous Library
 *
 * Request coalescing primitives: many callers ask for the outcome of work
 * identified by a key, exactly one of them becomes responsible for producing
 * it, and everybody observes the single broadcast result.
 *
 * - [`cell`]: broadcast cells handing one value to many blocked readers
 * - [`registry`]: concurrent key -> cell map with atomic get-or-create
 */

pub mod cell;
pub mod core;
pub mod monitoring;
pub mod registry;

// Re-exports
pub use cell::{BroadcastCell, CellFactory, CellKind, OneShotCell, RepeatableCell, SharedCell};
pub use crate::core::errors::{ConfigError, ConfigResult};
pub use monitoring::init_tracing;
pub use registry::{
    IntRegistry, MapStrategy, Registry, RegistryBuilder, RegistryConfig, RegistryStats,
    StringRegistry,
};
