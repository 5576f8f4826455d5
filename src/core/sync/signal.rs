/*!
 * Readiness Signal
 *
 * One-way "not ready -> ready" latch that threads can block on.
 *
 * # Design: Flag Is the Truth, Condvar Is Only a Doorbell
 *
 * The atomic `ready` flag is the single source of truth. The parking_lot
 * mutex/condvar pair exists only to put threads to sleep and wake them.
 * Waiters re-check the flag while holding the mutex, and the setter takes the
 * mutex before notifying, so a `set()` landing between a waiter's check and
 * its park cannot be lost.
 *
 * The waiter counter lets `set()` skip the mutex entirely when nobody is
 * parked. Flag and counter use SeqCst so that either the setter observes the
 * waiter or the waiter observes the flag.
 */

use super::traits::WakeResult;
use crate::core::limits::WAIT_SPIN_LIMIT;
use parking_lot::{Condvar, Mutex};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Latch that flips once from not-ready to ready and releases every waiter
#[repr(C, align(64))] // Cache-line aligned to prevent false sharing
pub struct ReadySignal {
    ready: AtomicBool,
    waiters: AtomicUsize,
    mutex: Mutex<()>,
    condvar: Condvar,
}

impl ReadySignal {
    /// Create an unset signal
    pub const fn new() -> Self {
        Self {
            ready: AtomicBool::new(false),
            waiters: AtomicUsize::new(0),
            mutex: Mutex::new(()),
            condvar: Condvar::new(),
        }
    }

    /// Non-blocking probe of the flag
    #[inline(always)]
    pub fn is_set(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Flip the flag and wake everybody parked on it
    ///
    /// Only the first call has any effect; later calls return
    /// [`WakeResult::AlreadySet`].
    pub fn set(&self) -> WakeResult {
        if self
            .ready
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return WakeResult::AlreadySet;
        }

        let count = self.waiters.load(Ordering::SeqCst);
        if count == 0 {
            return WakeResult::NoWaiters;
        }

        // Waiters hold the mutex from their flag check until they park.
        let _guard = self.mutex.lock();
        self.condvar.notify_all();
        WakeResult::Woken(count)
    }

    /// Block the calling thread until the flag is set
    ///
    /// Returns immediately if it already is. Spins briefly before parking.
    pub fn wait(&self) {
        if self.is_set() {
            return;
        }

        for _ in 0..WAIT_SPIN_LIMIT {
            std::hint::spin_loop();
            if self.is_set() {
                return;
            }
        }

        self.waiters.fetch_add(1, Ordering::SeqCst);
        let mut guard = self.mutex.lock();
        while !self.ready.load(Ordering::SeqCst) {
            self.condvar.wait(&mut guard);
        }
        drop(guard);
        self.waiters.fetch_sub(1, Ordering::SeqCst);
    }

    /// Approximate number of parked threads (for diagnostics)
    #[inline]
    pub fn waiter_count(&self) -> usize {
        self.waiters.load(Ordering::Relaxed)
    }
}

impl Default for ReadySignal {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ReadySignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadySignal")
            .field("ready", &self.is_set())
            .field("waiters", &self.waiter_count())
            .finish()
    }
}
