/*!
 * Repeatable Broadcast Cell
 *
 * Every broadcast replaces the visible value; only the first one flips the
 * readiness flag and wakes waiters.
 */

use super::BroadcastCell;
use crate::core::sync::ReadySignal;
use arc_swap::ArcSwapOption;
use std::sync::Arc;
use tracing::trace;

/// Cell whose value may be updated after it becomes ready
///
/// # Performance
///
/// - **Ready path**: one atomic load plus an `ArcSwap` load, no mutex
/// - **Broadcast**: single pointer swap; condvar touched only on the first
///   broadcast and only if someone is parked
///
/// # Example
///
/// ```
/// use rendezvous::cell::{BroadcastCell, RepeatableCell};
///
/// let cell = RepeatableCell::new();
/// assert!(cell.receive().is_none());
///
/// cell.broadcast(1);
/// assert_eq!(*cell.wait(), 1);
///
/// cell.broadcast(2);
/// assert_eq!(*cell.wait(), 2);
/// ```
pub struct RepeatableCell<V> {
    value: ArcSwapOption<V>,
    signal: ReadySignal,
}

impl<V> RepeatableCell<V>
where
    V: Send + Sync + 'static,
{
    /// Create a cell in the not-ready state
    pub fn new() -> Self {
        Self {
            value: ArcSwapOption::empty(),
            signal: ReadySignal::new(),
        }
    }
}

impl<V> Default for RepeatableCell<V>
where
    V: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> BroadcastCell<V> for RepeatableCell<V>
where
    V: Send + Sync + 'static,
{
    fn broadcast(&self, value: V) {
        // Value must be visible before the flag flips
        self.value.store(Some(Arc::new(value)));

        let result = self.signal.set();
        if result.is_first() {
            trace!(cell = "repeatable", woken = result.count(), "first broadcast");
        }
    }

    #[inline]
    fn receive(&self) -> Option<Arc<V>> {
        if !self.signal.is_set() {
            return None;
        }
        self.value.load_full()
    }

    fn wait(&self) -> Arc<V> {
        loop {
            self.signal.wait();
            if let Some(value) = self.value.load_full() {
                return value;
            }
        }
    }

    #[inline]
    fn is_ready(&self) -> bool {
        self.signal.is_set()
    }

    fn waiter_count(&self) -> usize {
        self.signal.waiter_count()
    }

    fn name(&self) -> &'static str {
        "repeatable"
    }
}

impl<V> std::fmt::Debug for RepeatableCell<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepeatableCell")
            .field("signal", &self.signal)
            .finish_non_exhaustive()
    }
}
