//! Wiring: config → taxonomy, adapters, cache, service.

use std::sync::Arc;

use tracing::info;

use wellness_cache::InMemoryDatasetCache;
use wellness_contracts::error::WellnessResult;
use wellness_core::{
    traits::{Clock, SourceAdapter, SystemClock},
    Pipeline, WellnessService,
};
use wellness_sources::build_adapters;
use wellness_taxonomy::TomlTaxonomy;

use crate::config::ServerConfig;

/// Everything the CLI commands and HTTP handlers share.
pub struct App {
    pub service: WellnessService,
    /// The same cache the service writes to, kept for stats and peeking.
    pub cache: InMemoryDatasetCache,
    pub taxonomy: Arc<TomlTaxonomy>,
}

impl App {
    pub fn from_config(config: &ServerConfig) -> WellnessResult<Self> {
        let taxonomy = match &config.taxonomy_path {
            Some(path) => TomlTaxonomy::from_file(path)?,
            None => TomlTaxonomy::builtin()?,
        };
        let adapters = build_adapters(&config.sources, config.adapter_timeout())?;
        info!(
            adapters = adapters.len(),
            ttl_hours = config.cache_ttl_hours,
            "application assembled"
        );
        Ok(Self::assemble(adapters, Arc::new(taxonomy), config, Arc::new(SystemClock)))
    }

    pub fn assemble(
        adapters: Vec<Arc<dyn SourceAdapter>>,
        taxonomy: Arc<TomlTaxonomy>,
        config: &ServerConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let pipeline = Pipeline::new(adapters, taxonomy.clone(), taxonomy.clone())
            .with_adapter_timeout(config.adapter_timeout());
        let cache = InMemoryDatasetCache::new();
        let service = WellnessService::new(pipeline, Arc::new(cache.clone()), clock)
            .with_ttl(config.cache_ttl());
        Self {
            service,
            cache,
            taxonomy,
        }
    }
}
