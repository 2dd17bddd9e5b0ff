//! Declarative source configuration.
//!
//! Each entry in a `[[sources]]` array picks an adapter by `kind`:
//!
//! ```toml
//! [[sources]]
//! kind = "static"
//! provider = "who"
//!
//! [[sources]]
//! kind = "json"
//! provider = "oecd"
//! url = "https://stats.internal/oecd/records.json"
//!
//! [[sources]]
//! kind = "csv"
//! provider = "world-bank"
//! url = "https://stats.internal/wdi.csv"
//! source_name = "World Bank WDI"
//! source_url = "https://data.worldbank.org"
//! ```

use serde::{Deserialize, Serialize};

use wellness_contracts::{provider::Provider, record::SourceDescriptor};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    /// The built-in table for `provider`.
    Static { provider: Provider },

    /// A JSON endpoint returning `CountryRawRecord`s.
    Json { provider: Provider, url: String },

    /// A wide CSV table; every value is attributed to the configured source.
    Csv {
        provider: Provider,
        url: String,
        source_name: String,
        #[serde(default)]
        source_url: Option<String>,
        #[serde(default)]
        source_year: Option<i32>,
        /// Mark values as modelled estimates.
        #[serde(default)]
        simulated: bool,
    },
}

impl SourceConfig {
    pub fn provider(&self) -> Provider {
        match self {
            SourceConfig::Static { provider }
            | SourceConfig::Json { provider, .. }
            | SourceConfig::Csv { provider, .. } => *provider,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SourceConfig::Static { .. } => "static",
            SourceConfig::Json { .. } => "json",
            SourceConfig::Csv { .. } => "csv",
        }
    }

    /// One static entry per provider, in priority order.
    pub fn builtin() -> Vec<SourceConfig> {
        wellness_contracts::provider::PROVIDER_PRIORITY
            .iter()
            .map(|provider| SourceConfig::Static { provider: *provider })
            .collect()
    }
}

/// The descriptor a CSV source attaches to every value it parses.
pub(crate) fn csv_source(
    source_name: &str,
    source_url: Option<&str>,
    source_year: Option<i32>,
    simulated: bool,
) -> SourceDescriptor {
    SourceDescriptor {
        name: source_name.to_string(),
        url: source_url.map(str::to_string),
        year: source_year,
        simulated,
    }
}
