//! Core trait definitions for the wellness pipeline.
//!
//! These traits are the seams between the pure transforms in this crate and
//! everything that touches the outside world:
//!
//! - `SourceAdapter`  : produces one provider's records (HTTP, queue, static table)
//! - `CountryResolver`: maps provider spellings to canonical country names
//! - `MetricCatalog`  : the static category and unit tables
//! - `DatasetCache`   : holds the last known-good dataset
//! - `Clock`          : the time source used for cache expiry

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use wellness_contracts::{
    cache::CacheEntry,
    catalog::{MetricCategory, MetricUnit},
    error::WellnessResult,
    provider::Provider,
    record::CountryRawRecord,
};

/// A producer of per-country records for one provider.
///
/// Implementations may do network I/O. The pipeline wraps every call in a
/// timeout and turns any error into an empty batch, so an adapter never has
/// to hide its own failures.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// The provider this adapter speaks for.
    fn provider(&self) -> Provider;

    /// Fetch the provider's current records.
    async fn fetch(&self) -> WellnessResult<Vec<CountryRawRecord>>;
}

/// Maps a provider-specific country name to its canonical form.
///
/// Must be idempotent: `standardize(standardize(x)) == standardize(x)`.
/// Names the resolver does not know are returned unchanged.
pub trait CountryResolver: Send + Sync {
    fn standardize(&self, raw: &str) -> String;
}

/// Static metric taxonomy.
pub trait MetricCatalog: Send + Sync {
    /// Categories in declaration order.
    fn categories(&self) -> &[MetricCategory];

    /// Documented units, one per metric.
    fn units(&self) -> &[MetricUnit];

    /// Unit of a single metric, if documented.
    fn unit(&self, metric: &str) -> Option<&MetricUnit> {
        self.units().iter().find(|u| u.metric == metric)
    }
}

/// Storage for the last successfully computed dataset.
///
/// Implementations only hold data; expiry and refresh policy live in
/// `WellnessService`. `store` replaces the previous entry atomically.
pub trait DatasetCache: Send + Sync {
    fn load(&self) -> Option<CacheEntry>;
    fn store(&self, entry: CacheEntry);
    fn clear(&self);
}

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
