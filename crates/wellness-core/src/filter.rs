//! Request-time narrowing of an annotated dataset.
//!
//! Filtering never mutates its input; it always builds a new dataset.
//!
//! - countries: intersection of requested and known names, in dataset order;
//!   an empty intersection falls back to every known country
//! - metrics: requested keys that exist in the dataset; unknown keys are
//!   dropped silently. Absent means all metrics.

use std::collections::BTreeSet;

use wellness_contracts::dataset::{AnnotatedMergedData, CategorizedMetrics, MetricTable};

/// Which countries and metrics a filtered view keeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub countries: Vec<String>,
    /// `None` keeps every metric.
    pub metrics: Option<BTreeSet<String>>,
}

impl Selection {
    /// Resolve requested (already canonical) names against the dataset.
    pub fn resolve(
        data: &AnnotatedMergedData,
        countries: Option<&[String]>,
        metrics: Option<&[String]>,
    ) -> Self {
        let countries = match countries {
            Some(requested) => {
                let matched: Vec<String> = data
                    .countries
                    .iter()
                    .filter(|c| requested.contains(c))
                    .cloned()
                    .collect();
                if matched.is_empty() {
                    data.countries.clone()
                } else {
                    matched
                }
            }
            None => data.countries.clone(),
        };

        let metrics = metrics.map(|requested| {
            requested
                .iter()
                .filter(|m| data.metrics.contains_key(m.as_str()))
                .cloned()
                .collect()
        });

        Self { countries, metrics }
    }

    fn keeps_metric(&self, key: &str) -> bool {
        self.metrics.as_ref().map_or(true, |m| m.contains(key))
    }

    fn keeps_country(&self, country: &str) -> bool {
        self.countries.iter().any(|c| c == country)
    }
}

/// Build the filtered view described by `selection`.
pub fn apply(data: &AnnotatedMergedData, selection: &Selection) -> AnnotatedMergedData {
    let metrics = data
        .metrics
        .iter()
        .filter(|(key, _)| selection.keeps_metric(key))
        .map(|(key, values)| {
            let values = values
                .iter()
                .filter(|(country, _)| selection.keeps_country(country))
                .map(|(country, v)| (country.clone(), *v))
                .collect();
            (key.clone(), values)
        })
        .collect();

    let sources = data
        .sources
        .iter()
        .filter(|(country, _)| selection.keeps_country(country))
        .map(|(country, per_metric)| {
            let per_metric = per_metric
                .iter()
                .filter(|(key, _)| selection.keeps_metric(key))
                .map(|(key, source)| (key.clone(), source.clone()))
                .collect();
            (country.clone(), per_metric)
        })
        .collect();

    let categorized_metrics = data
        .categorized_metrics
        .as_ref()
        .map(|categorized| filter_categorized(categorized, selection));

    AnnotatedMergedData {
        countries: selection.countries.clone(),
        metrics,
        sources,
        categorized_metrics,
        country_codes: data
            .country_codes
            .iter()
            .filter(|(country, _)| selection.keeps_country(country))
            .map(|(country, code)| (country.clone(), code.clone()))
            .collect(),
        years: data
            .years
            .iter()
            .filter(|(country, _)| selection.keeps_country(country))
            .map(|(country, year)| (country.clone(), *year))
            .collect(),
    }
}

fn filter_categorized(categorized: &CategorizedMetrics, selection: &Selection) -> CategorizedMetrics {
    categorized
        .iter()
        .filter_map(|(category, table)| {
            let table: MetricTable = table
                .iter()
                .filter(|(key, _)| selection.keeps_metric(key))
                .map(|(key, values)| {
                    let values = values
                        .iter()
                        .filter(|(country, _)| selection.keeps_country(country))
                        .map(|(country, v)| (country.clone(), *v))
                        .collect();
                    (key.clone(), values)
                })
                .collect();
            (!table.is_empty()).then(|| (category.clone(), table))
        })
        .collect()
}
