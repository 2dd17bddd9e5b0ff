//! The full fetch-and-enrich pipeline.
//!
//!   fetch (parallel, per-adapter timeout) → merge → categorize → derive → mark
//!
//! Fetching is a fan-out/fan-in barrier: every adapter is polled concurrently
//! and the merge starts only after all of them have settled. An adapter that
//! errors or exceeds its time budget contributes an empty batch; it never
//! cancels its siblings or aborts the run.

use std::{sync::Arc, time::Duration};

use futures::future::join_all;
use tracing::{debug, info, warn};

use wellness_contracts::{
    cache::RunId,
    dataset::{AnnotatedMergedData, RawMergedData},
    error::{WellnessError, WellnessResult},
    record::ProviderBatch,
};

use crate::{
    categorize::categorize,
    derive::derive_metrics,
    merge::{merge, metric_overlap},
    provenance::mark_provenance,
    traits::{CountryResolver, MetricCatalog, SourceAdapter},
};

/// Default time budget for a single adapter call.
pub const DEFAULT_ADAPTER_TIMEOUT: Duration = Duration::from_secs(10);

/// Owns the adapters and static tables needed to build a dataset.
pub struct Pipeline {
    adapters: Vec<Arc<dyn SourceAdapter>>,
    resolver: Arc<dyn CountryResolver>,
    catalog: Arc<dyn MetricCatalog>,
    adapter_timeout: Duration,
}

impl Pipeline {
    pub fn new(
        adapters: Vec<Arc<dyn SourceAdapter>>,
        resolver: Arc<dyn CountryResolver>,
        catalog: Arc<dyn MetricCatalog>,
    ) -> Self {
        Self {
            adapters,
            resolver,
            catalog,
            adapter_timeout: DEFAULT_ADAPTER_TIMEOUT,
        }
    }

    pub fn with_adapter_timeout(mut self, timeout: Duration) -> Self {
        self.adapter_timeout = timeout;
        self
    }

    pub fn resolver(&self) -> &dyn CountryResolver {
        self.resolver.as_ref()
    }

    pub fn catalog(&self) -> &dyn MetricCatalog {
        self.catalog.as_ref()
    }

    /// Fetch, merge, and enrich. Returns `NoData` if no provider contributed a
    /// usable record.
    pub async fn run(&self, run_id: RunId) -> WellnessResult<AnnotatedMergedData> {
        info!(run_id = %run_id, adapters = self.adapters.len(), "pipeline run starting");
        let batches = self.fetch_all(run_id).await;
        let data = self.process(batches)?;
        info!(
            run_id = %run_id,
            countries = data.countries.len(),
            metrics = data.metrics.len(),
            "pipeline run complete"
        );
        Ok(data)
    }

    /// Poll every adapter concurrently and wait for all of them to settle.
    ///
    /// Batches come back in adapter order; the merge re-orders them by
    /// provider priority anyway.
    pub async fn fetch_all(&self, run_id: RunId) -> Vec<ProviderBatch> {
        let fetches = self
            .adapters
            .iter()
            .map(|adapter| self.fetch_one(adapter.as_ref(), run_id));
        join_all(fetches).await
    }

    async fn fetch_one(&self, adapter: &dyn SourceAdapter, run_id: RunId) -> ProviderBatch {
        let provider = adapter.provider();
        match tokio::time::timeout(self.adapter_timeout, adapter.fetch()).await {
            Ok(Ok(records)) => {
                debug!(run_id = %run_id, provider = %provider, records = records.len(), "adapter fetched");
                ProviderBatch::new(provider, records)
            }
            Ok(Err(error)) => {
                warn!(run_id = %run_id, provider = %provider, error = %error, "adapter failed; continuing without it");
                ProviderBatch::empty(provider)
            }
            Err(_) => {
                let error = WellnessError::AdapterTimeout {
                    provider,
                    timeout_ms: u64::try_from(self.adapter_timeout.as_millis()).unwrap_or(u64::MAX),
                };
                warn!(run_id = %run_id, provider = %provider, error = %error, "adapter timed out; continuing without it");
                ProviderBatch::empty(provider)
            }
        }
    }

    /// Run the pure transform stages over already-fetched batches.
    pub fn process(&self, batches: Vec<ProviderBatch>) -> WellnessResult<AnnotatedMergedData> {
        self.enrich(batches).map(mark_provenance)
    }

    /// Merge, categorize, and derive, stopping short of provenance marking.
    ///
    /// The result still carries full source descriptors, which is what the
    /// long-format export needs.
    pub fn enrich(&self, batches: Vec<ProviderBatch>) -> WellnessResult<RawMergedData> {
        let total: usize = batches.iter().map(|b| b.records.len()).sum();
        if total == 0 {
            return Err(WellnessError::NoData);
        }

        for (metric, providers) in metric_overlap(&batches) {
            if providers > 1 {
                debug!(metric = %metric, providers, "metric reported by several providers; last in priority wins");
            }
        }

        let merged = merge(self.resolver(), batches);
        if merged.countries.is_empty() {
            warn!(records = total, "no usable records after merge");
            return Err(WellnessError::NoData);
        }
        let categorized = categorize(merged, self.catalog());
        Ok(derive_metrics(categorized))
    }
}
