//! # wellness-cache
//!
//! Storage for the last known-good wellness dataset.
//!
//! [`InMemoryDatasetCache`] implements
//! [`DatasetCache`](wellness_core::traits::DatasetCache). It is process-local
//! and holds a single entry; a restart starts cold.

pub mod memory;

pub use memory::{CacheStats, InMemoryDatasetCache};

// ── Tests ─────────────────────────────────────────────────────────────────────
