/*!
 * Registry Statistics
 * Best-effort counters for lookups, hits, creations and deletions
 */

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time copy of a registry's counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryStats {
    /// `get` and `get_or_create` calls
    pub lookups: u64,
    /// Lookups that found an existing cell
    pub hits: u64,
    /// Cells created by `get_or_create`
    pub creations: u64,
    /// `delete` calls that removed a mapping
    pub deletions: u64,
}

impl RegistryStats {
    /// Hit rate in percent (0 when no lookups happened)
    pub fn hit_rate(&self) -> f64 {
        if self.lookups == 0 {
            return 0.0;
        }
        (self.hits as f64 / self.lookups as f64) * 100.0
    }
}

/// Live counters
///
/// # Performance
/// - Cache-line aligned so counter traffic does not share a line with the map
#[repr(C, align(64))]
#[derive(Default)]
pub(crate) struct StatCounters {
    lookups: AtomicU64,
    hits: AtomicU64,
    creations: AtomicU64,
    deletions: AtomicU64,
}

impl StatCounters {
    #[inline(always)]
    pub(crate) fn record_lookup(&self, hit: bool) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        if hit {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[inline(always)]
    pub(crate) fn record_creation(&self) {
        self.creations.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub(crate) fn record_deletion(&self) {
        self.deletions.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> RegistryStats {
        RegistryStats {
            lookups: self.lookups.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            creations: self.creations.load(Ordering::Relaxed),
            deletions: self.deletions.load(Ordering::Relaxed),
        }
    }
}
