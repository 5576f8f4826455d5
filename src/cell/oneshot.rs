/*!
 * One-Shot Broadcast Cell
 *
 * Only the first broadcast stores a value; every later one is silently
 * ignored.
 */

use super::BroadcastCell;
use crate::core::sync::ReadySignal;
use arc_swap::ArcSwapOption;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::trace;

/// Cell whose value is immutable after the first broadcast
///
/// A `claimed` flag picks the single winning broadcaster without locking;
/// losers return before touching the value.
///
/// # Example
///
/// ```
/// use rendezvous::cell::{BroadcastCell, OneShotCell};
///
/// let cell = OneShotCell::new();
/// cell.broadcast("first");
/// cell.broadcast("second");
///
/// assert_eq!(*cell.wait(), "first");
/// ```
pub struct OneShotCell<V> {
    claimed: AtomicBool,
    value: ArcSwapOption<V>,
    signal: ReadySignal,
}

impl<V> OneShotCell<V>
where
    V: Send + Sync + 'static,
{
    /// Create a cell in the not-ready state
    pub fn new() -> Self {
        Self {
            claimed: AtomicBool::new(false),
            value: ArcSwapOption::empty(),
            signal: ReadySignal::new(),
        }
    }
}

impl<V> Default for OneShotCell<V>
where
    V: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> BroadcastCell<V> for OneShotCell<V>
where
    V: Send + Sync + 'static,
{
    fn broadcast(&self, value: V) {
        if self
            .claimed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            trace!(cell = "once", "broadcast ignored, value already claimed");
            return;
        }

        self.value.store(Some(Arc::new(value)));
        let result = self.signal.set();
        trace!(cell = "once", woken = result.count(), "first broadcast");
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
        "once"
    }
}

impl<V> std::fmt::Debug for OneShotCell<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OneShotCell")
            .field("claimed", &self.claimed.load(Ordering::Relaxed))
            .field("signal", &self.signal)
            .finish_non_exhaustive()
    }
}
