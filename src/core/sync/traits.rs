/*!
 * Wakeup Results
 *
 * Outcome of releasing the waiters parked on a readiness signal.
 */

/// Result of a wake operation
///
/// Compact representation (single usize) for efficient returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeResult {
    /// Released N parked waiters (N >= 1)
    Woken(usize),
    /// Nobody was parked when the signal fired
    NoWaiters,
    /// The signal had already fired; nothing happened
    AlreadySet,
}

impl WakeResult {
    /// Check if any waiters were woken
    #[inline(always)]
    pub fn is_woken(&self) -> bool {
        matches!(self, WakeResult::Woken(_))
    }

    /// Whether this call was the one that flipped the signal
    #[inline(always)]
    pub fn is_first(&self) -> bool {
        !matches!(self, WakeResult::AlreadySet)
    }

    /// Get number of woken waiters (0 if none)
    #[inline(always)]
    pub fn count(&self) -> usize {
        match self {
            WakeResult::Woken(n) => *n,
            WakeResult::NoWaiters | WakeResult::AlreadySet => 0,
        }
    }
}
