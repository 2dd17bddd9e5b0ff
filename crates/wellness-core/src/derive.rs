//! Derived (composite) metrics.
//!
//! Each definition names its input keys and a per-country formula. A country
//! missing any input, or whose result is not finite, is left out of the
//! derived metric entirely; no zero or default value is ever written.
//!
//! Derived values land in the flat `metrics` map under their own key and have
//! no source entry, so the provenance marker classifies them as mock.

use serde::Serialize;
use tracing::{debug, warn};

use wellness_contracts::dataset::RawMergedData;

/// A composite indicator computed from merged metrics.
#[derive(Clone, Copy, Serialize)]
pub struct DerivedMetric {
    pub key: &'static str,
    pub inputs: &'static [&'static str],
    pub description: &'static str,
    #[serde(skip)]
    formula: fn(&[f64]) -> f64,
}

impl std::fmt::Debug for DerivedMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedMetric")
            .field("key", &self.key)
            .field("inputs", &self.inputs)
            .finish()
    }
}

impl DerivedMetric {
    /// Apply the formula to input values given in `inputs` order.
    pub fn compute(&self, inputs: &[f64]) -> f64 {
        (self.formula)(inputs)
    }
}

/// Every derived metric the pipeline computes, in evaluation order.
pub const DERIVED_METRICS: &[DerivedMetric] = &[
    DerivedMetric {
        key: "healthcare_efficiency",
        inputs: &["life_expectancy", "health_expenditure_pct_gdp"],
        description: "Life expectancy per percentage point of GDP spent on health",
        formula: healthcare_efficiency,
    },
    DerivedMetric {
        key: "work_life_balance_score",
        inputs: &["working_hours", "leisure_time"],
        description: "Mean of inverted annual working hours and daily leisure share, 0-100",
        formula: work_life_balance_score,
    },
];

fn healthcare_efficiency(v: &[f64]) -> f64 {
    v[0] / v[1]
}

fn work_life_balance_score(v: &[f64]) -> f64 {
    ((100.0 - (v[0] / 3000.0 * 100.0)) + (v[1] / 120.0 * 100.0)) / 2.0
}

/// Compute every metric in `DERIVED_METRICS` and merge it into `metrics`.
pub fn derive_metrics(data: RawMergedData) -> RawMergedData {
    DERIVED_METRICS
        .iter()
        .fold(data, |data, metric| apply_derived(data, metric))
}

/// Compute one derived metric.
///
/// For every country it is computed for, the derived value replaces any
/// provider value under the same key and the provider's source entry for
/// that key is removed.
pub fn apply_derived(mut data: RawMergedData, metric: &DerivedMetric) -> RawMergedData {
    let mut computed: Vec<(String, f64)> = Vec::new();
    let mut inputs = Vec::with_capacity(metric.inputs.len());

    for country in &data.countries {
        inputs.clear();
        for key in metric.inputs {
            match data.value(key, country) {
                Some(v) => inputs.push(v),
                None => break,
            }
        }
        if inputs.len() != metric.inputs.len() {
            continue;
        }

        let value = metric.compute(&inputs);
        if !value.is_finite() {
            warn!(
                metric = metric.key,
                country = %country,
                "derived value is not finite; skipping"
            );
            continue;
        }
        computed.push((country.clone(), value));
    }

    debug!(metric = metric.key, countries = computed.len(), "derived metric computed");
    if computed.is_empty() {
        return data;
    }

    for (country, value) in computed {
        if let Some(sources) = data.sources.get_mut(&country) {
            sources.remove(metric.key);
        }
        data.metrics
            .entry(metric.key.to_string())
            .or_default()
            .insert(country, value);
    }
    data
}
