//! Provider-level records as they come out of a source adapter.
//!
//! A `CountryRawRecord` is one country's worth of metrics from one provider,
//! still carrying the provider's own spelling of the country name. Records
//! are grouped into a `ProviderBatch` so the merge can apply provider
//! precedence without inspecting the records themselves.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::provider::Provider;

/// Where a metric value came from.
///
/// The classification into real / estimated / mock is derived from these
/// fields by the provenance marker; adapters only report what they know.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    /// Publisher or dataset name (e.g. "WHO Global Health Observatory").
    pub name: String,
    /// Landing page or API endpoint. Absent for fabricated or unattributed data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Reference year of the published figure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Set by adapters that fill gaps with modelled or interpolated figures.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub simulated: bool,
}

impl SourceDescriptor {
    /// A descriptor with a name and URL and no year.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: Some(url.into()),
            year: None,
            simulated: false,
        }
    }

    /// Attach a reference year.
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Flag the figure as modelled rather than measured.
    pub fn simulated(mut self) -> Self {
        self.simulated = true;
        self
    }

    /// Placeholder descriptor for a metric that arrived without attribution.
    ///
    /// It has no URL, so it always classifies as mock.
    pub fn unattributed(provider: Provider) -> Self {
        Self {
            name: format!("{} (unattributed)", provider.display_name()),
            url: None,
            year: None,
            simulated: false,
        }
    }
}

/// One country's metrics as reported by a single provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryRawRecord {
    /// Country name in the provider's own spelling.
    pub country: String,
    /// ISO-like code when the provider supplies one.
    #[serde(default)]
    pub country_code: Option<String>,
    /// metricKey → value.
    #[serde(default)]
    pub metrics: BTreeMap<String, f64>,
    /// metricKey → source descriptor.
    #[serde(default)]
    pub source: BTreeMap<String, SourceDescriptor>,
    /// Reference year of the record.
    pub year: i32,
}

impl CountryRawRecord {
    pub fn new(country: impl Into<String>, year: i32) -> Self {
        Self {
            country: country.into(),
            country_code: None,
            metrics: BTreeMap::new(),
            source: BTreeMap::new(),
            year,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.country_code = Some(code.into());
        self
    }

    /// Add a metric value together with its source.
    pub fn with_metric(mut self, key: &str, value: f64, source: SourceDescriptor) -> Self {
        self.metrics.insert(key.to_string(), value);
        self.source.insert(key.to_string(), source);
        self
    }
}

/// Everything one provider returned in a fetch cycle.
///
/// A failed or timed-out fetch is represented by an empty `records` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderBatch {
    pub provider: Provider,
    pub records: Vec<CountryRawRecord>,
}

impl ProviderBatch {
    pub fn new(provider: Provider, records: Vec<CountryRawRecord>) -> Self {
        Self { provider, records }
    }

    /// An empty batch, used when the provider failed.
    pub fn empty(provider: Provider) -> Self {
        Self {
            provider,
            records: Vec::new(),
        }
    }
}

/// A single measured value for one (country, metric) pair after merging.
///
/// This is the long-format view used for CSV export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricRecord {
    pub country: String,
    pub country_code: Option<String>,
    pub metric_key: String,
    pub value: f64,
    pub year: Option<i32>,
    pub source: Option<SourceDescriptor>,
}
