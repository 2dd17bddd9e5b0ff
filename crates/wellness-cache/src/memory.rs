//! In-memory implementation of `DatasetCache`.
//!
//! `InMemoryDatasetCache` holds at most one `CacheEntry` behind a `Mutex`.
//! `store()` swaps the whole entry in one step, so a reader either sees the
//! previous dataset or the new one, never a mix. The dataset itself is an
//! `Arc`, so `load()` only clones a pointer.
//!
//! The cache keeps simple counters for the health endpoint; expiry policy
//! lives in `WellnessService`, not here.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::{debug, info};

use wellness_contracts::cache::CacheEntry;
use wellness_core::traits::DatasetCache;

// ── Internal mutable state ────────────────────────────────────────────────────

#[derive(Default)]
pub(crate) struct CacheState {
    pub(crate) entry: Option<CacheEntry>,
    pub(crate) stats: CacheStats,
}

/// Counters since process start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// `load()` calls that found an entry (fresh or not).
    pub hits: u64,
    /// `load()` calls on an empty cache.
    pub misses: u64,
    /// Successful `store()` calls.
    pub writes: u64,
}

// ── Public cache ──────────────────────────────────────────────────────────────

/// Single-slot, process-local dataset cache.
///
/// Cloning shares the same slot.
#[derive(Clone, Default)]
pub struct InMemoryDatasetCache {
    pub(crate) state: Arc<Mutex<CacheState>>,
}

impl InMemoryDatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats
    }

    /// Peek at the entry without touching the counters.
    pub fn peek(&self) -> Option<CacheEntry> {
        self.lock().entry.clone()
    }

    // The state is a plain value swap; a panic elsewhere cannot leave it
    // half-written, so a poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ── DatasetCache impl ─────────────────────────────────────────────────────────

impl DatasetCache for InMemoryDatasetCache {
    fn load(&self) -> Option<CacheEntry> {
        let mut state = self.lock();
        match state.entry.clone() {
            Some(entry) => {
                state.stats.hits += 1;
                Some(entry)
            }
            None => {
                state.stats.misses += 1;
                None
            }
        }
    }

    /// Replace the cached entry.
    fn store(&self, entry: CacheEntry) {
        let mut state = self.lock();
        info!(
            run_id = %entry.run_id,
            fetched_at = %entry.fetched_at,
            countries = entry.data.countries.len(),
            metrics = entry.data.metrics.len(),
            "dataset cached"
        );
        state.entry = Some(entry);
        state.stats.writes += 1;
    }

    fn clear(&self) {
        let mut state = self.lock();
        if state.entry.take().is_some() {
            debug!("dataset cache cleared");
        }
    }
}
