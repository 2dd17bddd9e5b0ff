//! Turns `SourceConfig` entries into live adapters.

use std::{sync::Arc, time::Duration};

use tracing::info;

use wellness_contracts::error::{WellnessError, WellnessResult};
use wellness_core::traits::SourceAdapter;

use crate::{
    adapters::{http_client, HttpCsvAdapter, HttpJsonAdapter, StaticTableAdapter},
    config::{csv_source, SourceConfig},
};

/// Build one adapter per config entry.
///
/// An empty list means the built-in static tables. Network adapters share a
/// single HTTP client whose request timeout is `http_timeout`. URLs are
/// validated up front so a typo fails at startup, not on the first refresh.
pub fn build_adapters(
    configs: &[SourceConfig],
    http_timeout: Duration,
) -> WellnessResult<Vec<Arc<dyn SourceAdapter>>> {
    let builtin;
    let configs = if configs.is_empty() {
        builtin = SourceConfig::builtin();
        &builtin[..]
    } else {
        configs
    };

    let needs_http = configs.iter().any(|c| !matches!(c, SourceConfig::Static { .. }));
    let http = if needs_http {
        Some(http_client(http_timeout)?)
    } else {
        None
    };

    let mut adapters: Vec<Arc<dyn SourceAdapter>> = Vec::with_capacity(configs.len());
    for config in configs {
        let adapter: Arc<dyn SourceAdapter> = match (config, &http) {
            (SourceConfig::Static { provider }, _) => Arc::new(StaticTableAdapter::builtin(*provider)),
            (SourceConfig::Json { provider, url }, Some(http)) => {
                validate_url(url)?;
                Arc::new(HttpJsonAdapter::new(*provider, url.clone(), http.clone()))
            }
            (
                SourceConfig::Csv {
                    provider,
                    url,
                    source_name,
                    source_url,
                    source_year,
                    simulated,
                },
                Some(http),
            ) => {
                validate_url(url)?;
                let source = csv_source(source_name, source_url.as_deref(), *source_year, *simulated);
                Arc::new(HttpCsvAdapter::new(*provider, url.clone(), source, http.clone()))
            }
            (_, None) => {
                return Err(WellnessError::ConfigError {
                    reason: format!("no HTTP client for {} source", config.kind()),
                })
            }
        };
        info!(provider = %config.provider(), kind = config.kind(), "source adapter configured");
        adapters.push(adapter);
    }
    Ok(adapters)
}

fn validate_url(url: &str) -> WellnessResult<()> {
    let parsed = reqwest::Url::parse(url).map_err(|e| WellnessError::ConfigError {
        reason: format!("invalid source URL '{}': {}", url, e),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(WellnessError::ConfigError {
            reason: format!("unsupported URL scheme '{}' in '{}'", other, url),
        }),
    }
}
