//! The query service: cache resolution, single-flight refresh, filtering.
//!
//! Request flow:
//!
//!   cache fresh? ──yes──▶ filter ──▶ response
//!        │no (or forced)
//!        ▼
//!   acquire refresh lock ─▶ re-check cache ─▶ run pipeline ─▶ store ─▶ filter
//!
//! The cache is written only after a pipeline run fully succeeds, so a
//! failed refresh leaves the previous dataset in place. Readers only ever
//! see whole `Arc` snapshots, never a dataset being built.

use std::sync::Arc;

use chrono::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use wellness_contracts::{
    cache::{CacheEntry, RunId},
    dataset::AnnotatedMergedData,
    error::WellnessResult,
    query::WellnessQuery,
};

use crate::{
    filter::{self, Selection},
    pipeline::Pipeline,
    standardize::standardize_names,
    traits::{Clock, DatasetCache},
};

/// How long a computed dataset is served before it is recomputed.
pub fn default_ttl() -> Duration {
    Duration::hours(24)
}

/// Serves filtered views of the merged dataset, refreshing it on expiry.
pub struct WellnessService {
    pipeline: Pipeline,
    cache: Arc<dyn DatasetCache>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    refresh_lock: Mutex<()>,
}

impl WellnessService {
    pub fn new(pipeline: Pipeline, cache: Arc<dyn DatasetCache>, clock: Arc<dyn Clock>) -> Self {
        Self {
            pipeline,
            cache,
            clock,
            ttl: default_ttl(),
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Answer a query.
    ///
    /// Requested country names go through the same resolver as provider data,
    /// so "USA" selects "United States".
    pub async fn get_wellness_data(&self, query: &WellnessQuery) -> WellnessResult<AnnotatedMergedData> {
        let data = self.dataset(query.force_refresh).await?;

        let countries = query
            .countries
            .as_ref()
            .map(|names| standardize_names(self.pipeline.resolver(), names));
        let selection = Selection::resolve(&data, countries.as_deref(), query.metrics.as_deref());
        debug!(
            countries = selection.countries.len(),
            metrics = ?selection.metrics.as_ref().map(|m| m.len()),
            "serving filtered view"
        );
        Ok(filter::apply(&data, &selection))
    }

    /// Force a refresh and return the new dataset.
    pub async fn refresh(&self) -> WellnessResult<Arc<AnnotatedMergedData>> {
        self.dataset(true).await
    }

    /// Resolve the full dataset from cache or by running the pipeline.
    async fn dataset(&self, force_refresh: bool) -> WellnessResult<Arc<AnnotatedMergedData>> {
        let requested_at = self.clock.now();

        if !force_refresh {
            if let Some(entry) = self.fresh_entry() {
                debug!(run_id = %entry.run_id, "cache hit");
                return Ok(entry.data);
            }
        }

        let _guard = self.refresh_lock.lock().await;

        // Another caller may have finished a refresh while we waited.
        if let Some(entry) = self.fresh_entry() {
            if !force_refresh || entry.fetched_at > requested_at {
                debug!(run_id = %entry.run_id, "reusing refresh completed while waiting");
                return Ok(entry.data);
            }
        }

        let run_id = RunId::new();
        info!(run_id = %run_id, forced = force_refresh, "refreshing dataset");
        match self.pipeline.run(run_id).await {
            Ok(data) => {
                let entry = CacheEntry::new(data, self.clock.now(), run_id);
                let data = entry.data.clone();
                self.cache.store(entry);
                Ok(data)
            }
            Err(error) => {
                warn!(run_id = %run_id, error = %error, "refresh failed; cache left unchanged");
                Err(error)
            }
        }
    }

    fn fresh_entry(&self) -> Option<CacheEntry> {
        let now = self.clock.now();
        self.cache.load().filter(|entry| entry.is_fresh(now, self.ttl))
    }
}
