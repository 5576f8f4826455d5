/*!
 * Broadcast Cells
 *
 * Single-slot holders that hand one value from a producer to any number of
 * blocked consumers.
 *
 * # Variants
 *
 * - [`RepeatableCell`]: every broadcast replaces the visible value; the first
 *   one also releases the waiters
 * - [`OneShotCell`]: only the first broadcast has any effect
 *
 * # Design: Trait Object at the Factory Seam
 *
 * Registries hand out [`SharedCell`] (`Arc<dyn BroadcastCell<V>>`) so the cell
 * variant is chosen at runtime by a pluggable [`CellFactory`]. Cell operations
 * never touch the registry's lock once a caller holds the handle.
 */

mod oneshot;
mod repeatable;

pub use oneshot::OneShotCell;
pub use repeatable::RepeatableCell;

use crate::core::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

/// Capability set shared by every cell variant
///
/// Implementations must be:
/// - **Thread-safe**: every method callable concurrently from many threads
/// - **Tear-free**: a reader sees either no value or a whole value
/// - **Flag-driven**: readiness, not the wakeup, decides what readers see
pub trait BroadcastCell<V>: Send + Sync
where
    V: Send + Sync + 'static,
{
    /// Supply a value and wake blocked waiters
    fn broadcast(&self, value: V);

    /// Non-blocking poll
    ///
    /// Returns `None` while not ready. May still report not-ready while a
    /// concurrent broadcast is in flight.
    fn receive(&self) -> Option<Arc<V>>;

    /// Block until the first broadcast completes, then return the current value
    fn wait(&self) -> Arc<V>;

    /// Whether a broadcast has completed
    fn is_ready(&self) -> bool;

    /// Approximate number of parked waiters (for diagnostics)
    fn waiter_count(&self) -> usize {
        0
    }

    /// Variant name for debugging
    fn name(&self) -> &'static str;
}

/// Shared handle to a cell of any variant
pub type SharedCell<V> = Arc<dyn BroadcastCell<V>>;

/// Constructor used by registries to create cells on demand
pub type CellFactory<V> = Arc<dyn Fn() -> SharedCell<V> + Send + Sync>;

/// Built-in cell variants, selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    /// Later broadcasts keep updating the value
    #[default]
    Repeatable,
    /// Later broadcasts are ignored
    Once,
}

impl CellKind {
    /// Create a standalone cell of this kind
    pub fn create<V>(self) -> SharedCell<V>
    where
        V: Send + Sync + 'static,
    {
        match self {
            CellKind::Repeatable => Arc::new(RepeatableCell::<V>::new()),
            CellKind::Once => Arc::new(OneShotCell::<V>::new()),
        }
    }

    /// Factory producing cells of this kind
    pub fn factory<V>(self) -> CellFactory<V>
    where
        V: Send + Sync + 'static,
    {
        Arc::new(move || self.create::<V>())
    }
}

impl FromStr for CellKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "repeatable" | "resend" => Ok(CellKind::Repeatable),
            "once" | "oneshot" => Ok(CellKind::Once),
            other => Err(ConfigError::InvalidCellKind(other.to_string())),
        }
    }
}

/// Factory for the default (repeatable) variant
pub fn default_factory<V>() -> CellFactory<V>
where
    V: Send + Sync + 'static,
{
    CellKind::default().factory()
}
