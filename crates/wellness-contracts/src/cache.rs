//! Cached pipeline results.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::dataset::AnnotatedMergedData;

/// Unique identifier for one pipeline run.
///
/// Appears in every log line the run emits and in the cache entry it produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub uuid::Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A fully processed dataset and the instant it was produced.
///
/// The data sits behind an `Arc` so readers can hold on to a snapshot while
/// a refresh swaps in a newer one.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub data: Arc<AnnotatedMergedData>,
    pub fetched_at: DateTime<Utc>,
    pub run_id: RunId,
}

impl CacheEntry {
    pub fn new(data: AnnotatedMergedData, fetched_at: DateTime<Utc>, run_id: RunId) -> Self {
        Self {
            data: Arc::new(data),
            fetched_at,
            run_id,
        }
    }

    /// True while `now - fetched_at` is strictly below `ttl`.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.fetched_at < ttl
    }
}
