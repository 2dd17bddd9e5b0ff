//! Merged dataset shapes.
//!
//! The pipeline produces two distinct shapes:
//!
//! - `RawMergedData`: scalar metric values, output of merge / categorize / derive
//! - `AnnotatedMergedData`: every value tagged with its provenance, output of
//!   the provenance marker and the only shape served to callers
//!
//! Both are metric-major (`metric → country → value`). All maps are ordered so
//! that serializing the same dataset twice yields identical bytes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    provenance::{ProvenanceKind, ProvenanceSummary},
    record::{MetricRecord, SourceDescriptor},
};

/// country → value
pub type CountryValues = BTreeMap<String, f64>;

/// metricKey → country → value
pub type MetricTable = BTreeMap<String, CountryValues>;

/// category → metricKey → country → value
pub type CategorizedMetrics = BTreeMap<String, MetricTable>;

/// country → metricKey → source
pub type SourceTable = BTreeMap<String, BTreeMap<String, SourceDescriptor>>;

/// Canonical merged view of one country across all providers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryDataset {
    /// Canonical country name. Unique across a merge.
    pub country: String,
    /// First non-null code seen across providers.
    pub country_code: Option<String>,
    /// metricKey → value, last writer in provider order wins.
    pub metrics: BTreeMap<String, f64>,
    /// metricKey → source. Has an entry for every key in `metrics`.
    pub sources: BTreeMap<String, SourceDescriptor>,
    /// Most recent year observed for this country.
    pub year: Option<i32>,
}

impl CountryDataset {
    pub fn new(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            country_code: None,
            metrics: BTreeMap::new(),
            sources: BTreeMap::new(),
            year: None,
        }
    }
}

/// Dataset-wide merge result with scalar metric values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMergedData {
    /// Canonical names in first-seen order.
    pub countries: Vec<String>,
    pub metrics: MetricTable,
    pub sources: SourceTable,
    pub country_codes: BTreeMap<String, Option<String>>,
    /// country → most recent year.
    #[serde(default)]
    pub years: BTreeMap<String, i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categorized_metrics: Option<CategorizedMetrics>,
}

impl RawMergedData {
    /// Look up one scalar value.
    pub fn value(&self, metric: &str, country: &str) -> Option<f64> {
        self.metrics.get(metric).and_then(|m| m.get(country)).copied()
    }

    /// Flatten into long format, ordered by country (first-seen) then metric key.
    pub fn metric_records(&self) -> Vec<MetricRecord> {
        let mut out = Vec::new();
        for country in &self.countries {
            for (metric_key, values) in &self.metrics {
                let Some(value) = values.get(country) else {
                    continue;
                };
                out.push(MetricRecord {
                    country: country.clone(),
                    country_code: self.country_codes.get(country).cloned().flatten(),
                    metric_key: metric_key.clone(),
                    value: *value,
                    year: self.years.get(country).copied(),
                    source: self
                        .sources
                        .get(country)
                        .and_then(|s| s.get(metric_key))
                        .cloned(),
                });
            }
        }
        out
    }
}

/// A metric value with its provenance attached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaggedValue {
    pub value: f64,
    pub source_type: ProvenanceKind,
}

/// A source descriptor after classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedSource {
    pub name: String,
    pub url: Option<String>,
    pub year: Option<i32>,
    pub source_type: ProvenanceKind,
}

/// metricKey → country → tagged value
pub type TaggedMetricTable = BTreeMap<String, BTreeMap<String, TaggedValue>>;

/// country → metricKey → annotated source
pub type AnnotatedSourceTable = BTreeMap<String, BTreeMap<String, AnnotatedSource>>;

/// Dataset-wide merge result with provenance-tagged values.
///
/// Immutable once built; filtering produces a new instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedMergedData {
    pub countries: Vec<String>,
    pub metrics: TaggedMetricTable,
    pub sources: AnnotatedSourceTable,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categorized_metrics: Option<CategorizedMetrics>,
    pub country_codes: BTreeMap<String, Option<String>>,
    #[serde(default)]
    pub years: BTreeMap<String, i32>,
}

impl AnnotatedMergedData {
    pub fn value(&self, metric: &str, country: &str) -> Option<TaggedValue> {
        self.metrics.get(metric).and_then(|m| m.get(country)).copied()
    }

    pub fn source(&self, country: &str, metric: &str) -> Option<&AnnotatedSource> {
        self.sources.get(country).and_then(|s| s.get(metric))
    }

    /// Count tagged values per provenance kind.
    pub fn provenance_summary(&self) -> ProvenanceSummary {
        let mut summary = ProvenanceSummary::default();
        for values in self.metrics.values() {
            for tagged in values.values() {
                summary.record(tagged.source_type);
            }
        }
        summary
    }
}
