//! Multi-provider merge.
//!
//! The merge is an ordered reduce over provider batches:
//!
//!   standardize names → sort batches by `PROVIDER_PRIORITY` → overlay → pivot
//!
//! Overlay is last-write-wins per (country, metric). A later provider in the
//! priority list replaces both the value and the source of an earlier one.
//! There is no quality weighting or averaging.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, warn};

use wellness_contracts::{
    dataset::{CountryDataset, RawMergedData},
    record::{ProviderBatch, SourceDescriptor},
};

use crate::{standardize::standardize_batch, traits::CountryResolver};

/// Merge provider batches into the metric-major dataset.
///
/// Batches may arrive in any order and any provider may be missing or empty;
/// missing providers simply contribute nothing.
pub fn merge(resolver: &dyn CountryResolver, batches: Vec<ProviderBatch>) -> RawMergedData {
    pivot(merge_countries(resolver, batches))
}

/// Merge provider batches into one `CountryDataset` per canonical country,
/// in first-seen order.
pub fn merge_countries(
    resolver: &dyn CountryResolver,
    batches: Vec<ProviderBatch>,
) -> Vec<CountryDataset> {
    let mut datasets: Vec<CountryDataset> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for batch in order_batches(batches) {
        let provider = batch.provider;
        let batch = standardize_batch(resolver, batch);
        debug!(provider = %provider, records = batch.records.len(), "merging provider batch");

        for record in batch.records {
            if record.country.is_empty() {
                warn!(provider = %provider, "skipping record with blank country name");
                continue;
            }

            let slot = match index.get(&record.country) {
                Some(&slot) => slot,
                None => {
                    datasets.push(CountryDataset::new(record.country.clone()));
                    index.insert(record.country.clone(), datasets.len() - 1);
                    datasets.len() - 1
                }
            };
            let entry = &mut datasets[slot];

            if entry.country_code.is_none() {
                entry.country_code = record
                    .country_code
                    .as_deref()
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(str::to_string);
            }
            entry.year = Some(entry.year.map_or(record.year, |y| y.max(record.year)));

            for (key, value) in &record.metrics {
                if !value.is_finite() {
                    warn!(
                        provider = %provider,
                        country = %record.country,
                        metric = %key,
                        "skipping non-finite metric value"
                    );
                    continue;
                }
                let source = record
                    .source
                    .get(key)
                    .cloned()
                    .unwrap_or_else(|| SourceDescriptor::unattributed(provider));
                entry.metrics.insert(key.clone(), *value);
                entry.sources.insert(key.clone(), source);
            }
        }
    }

    datasets
}

/// Pivot country-major datasets into the metric-major shape.
pub fn pivot(datasets: Vec<CountryDataset>) -> RawMergedData {
    let mut out = RawMergedData::default();

    for dataset in datasets {
        let country = dataset.country;
        for (key, value) in dataset.metrics {
            out.metrics
                .entry(key)
                .or_default()
                .insert(country.clone(), value);
        }
        if !dataset.sources.is_empty() {
            out.sources.insert(country.clone(), dataset.sources);
        }
        if let Some(year) = dataset.year {
            out.years.insert(country.clone(), year);
        }
        out.country_codes.insert(country.clone(), dataset.country_code);
        out.countries.push(country);
    }

    out
}

/// Stable sort by provider priority; records inside a batch keep their order,
/// and two batches from the same provider keep their relative order.
fn order_batches(mut batches: Vec<ProviderBatch>) -> Vec<ProviderBatch> {
    batches.sort_by_key(|b| b.provider.priority());
    batches
}

/// Count how many providers contributed each metric key. Useful for spotting
/// keys where last-write-wins silently discarded values.
pub fn metric_overlap(batches: &[ProviderBatch]) -> BTreeMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for batch in batches {
        let mut seen: Vec<&str> = Vec::new();
        for record in &batch.records {
            for key in record.metrics.keys() {
                if !seen.contains(&key.as_str()) {
                    seen.push(key.as_str());
                }
            }
        }
        for key in seen {
            *counts.entry(key.to_string()).or_default() += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use wellness_contracts::{
        provider::Provider,
        record::{CountryRawRecord, SourceDescriptor},
    };

    use super::*;
    use crate::testing::{record, AliasResolver};

    fn batch(provider: Provider, records: Vec<CountryRawRecord>) -> ProviderBatch {
        ProviderBatch::new(provider, records)
    }

    // ── Deduplication ────────────────────────────────────────────────────────

    #[test]
    fn aliases_merge_into_one_country() {
        let resolver = AliasResolver::us_uk();
        let data = merge(
            &resolver,
            vec![
                batch(Provider::Who, vec![record("USA", 2022, &[("happiness", 7.0)])]),
                batch(
                    Provider::Oecd,
                    vec![record("United States of America", 2022, &[("healthcare", 8.0)])],
                ),
            ],
        );

        assert_eq!(data.countries, vec!["United States".to_string()]);
        assert_eq!(data.value("happiness", "United States"), Some(7.0));
        assert_eq!(data.value("healthcare", "United States"), Some(8.0));
    }

    #[test]
    fn padded_names_resolve_through_the_alias_table() {
        let resolver = AliasResolver::us_uk();
        let data = merge(
            &resolver,
            vec![
                batch(Provider::Who, vec![record(" USA", 2022, &[("happiness", 7.0)])]),
                batch(Provider::Oecd, vec![record("United States ", 2022, &[("healthcare", 8.0)])]),
            ],
        );

        assert_eq!(data.countries, vec!["United States".to_string()]);
        assert_eq!(data.value("happiness", "United States"), Some(7.0));
    }

    #[test]
    fn countries_keep_first_seen_order_across_priority() {
        let resolver = AliasResolver::us_uk();
        // Passed out of order; WHO must still be reduced first.
        let data = merge(
            &resolver,
            vec![
                batch(Provider::WorldHappiness, vec![record("Japan", 2023, &[("a", 1.0)])]),
                batch(
                    Provider::Who,
                    vec![
                        record("Chile", 2022, &[("b", 2.0)]),
                        record("UK", 2022, &[("b", 3.0)]),
                    ],
                ),
            ],
        );

        assert_eq!(
            data.countries,
            vec!["Chile".to_string(), "United Kingdom".to_string(), "Japan".to_string()]
        );
    }

    // ── Overlay ──────────────────────────────────────────────────────────────

    #[test]
    fn later_provider_wins_on_collision() {
        let resolver = AliasResolver::us_uk();
        let who = CountryRawRecord::new("Norway", 2021).with_metric(
            "life_expectancy",
            83.0,
            SourceDescriptor::new("WHO", "https://who.int"),
        );
        let wb = CountryRawRecord::new("Norway", 2020).with_metric(
            "life_expectancy",
            83.2,
            SourceDescriptor::new("World Bank", "https://data.worldbank.org"),
        );

        // World Bank passed first but ranks after WHO.
        let data = merge(
            &resolver,
            vec![batch(Provider::WorldBank, vec![wb]), batch(Provider::Who, vec![who])],
        );

        assert_eq!(data.value("life_expectancy", "Norway"), Some(83.2));
        assert_eq!(data.sources["Norway"]["life_expectancy"].name, "World Bank");
    }

    #[test]
    fn first_non_null_country_code_wins() {
        let resolver = AliasResolver::us_uk();
        let data = merge(
            &resolver,
            vec![
                batch(Provider::Who, vec![CountryRawRecord::new("Chile", 2020)]),
                batch(Provider::Who, vec![CountryRawRecord::new("Chile", 2020).with_code("")]),
                batch(Provider::Who, vec![CountryRawRecord::new("Chile", 2020).with_code("  ")]),
                batch(Provider::Oecd, vec![CountryRawRecord::new("Chile", 2020).with_code("CL")]),
                batch(Provider::Un, vec![CountryRawRecord::new("Chile", 2020).with_code("CHL")]),
            ],
        );
        assert_eq!(data.country_codes["Chile"].as_deref(), Some("CL"));
    }

    #[test]
    fn most_recent_year_wins_but_sources_keep_their_own() {
        let resolver = AliasResolver::us_uk();
        let who = CountryRawRecord::new("Chile", 2023).with_metric(
            "uhc_index",
            80.0,
            SourceDescriptor::new("WHO", "https://who.int").with_year(2021),
        );
        let un = CountryRawRecord::new("Chile", 2019).with_metric(
            "hdi",
            0.86,
            SourceDescriptor::new("UNDP", "https://hdr.undp.org").with_year(2019),
        );

        let data = merge(
            &resolver,
            vec![batch(Provider::Who, vec![who]), batch(Provider::Un, vec![un])],
        );

        assert_eq!(data.years["Chile"], 2023);
        assert_eq!(data.sources["Chile"]["uhc_index"].year, Some(2021));
        assert_eq!(data.sources["Chile"]["hdi"].year, Some(2019));
    }

    // ── Provenance invariant ─────────────────────────────────────────────────

    #[test]
    fn every_metric_has_a_source_entry() {
        let resolver = AliasResolver::us_uk();
        let mut bare = CountryRawRecord::new("Peru", 2022);
        bare.metrics.insert("unemployment_rate".to_string(), 6.8);

        let data = merge(&resolver, vec![batch(Provider::WorldBank, vec![bare])]);

        let source = &data.sources["Peru"]["unemployment_rate"];
        assert!(source.url.is_none());
        assert!(source.name.contains("World Bank"));
    }

    // ── Degradation ──────────────────────────────────────────────────────────

    #[test]
    fn empty_and_missing_providers_contribute_nothing() {
        let resolver = AliasResolver::us_uk();
        let data = merge(
            &resolver,
            vec![
                ProviderBatch::empty(Provider::Who),
                batch(Provider::Un, vec![record("Kenya", 2022, &[("hdi", 0.6)])]),
            ],
        );
        assert_eq!(data.countries, vec!["Kenya".to_string()]);

        let empty = merge(&resolver, vec![]);
        assert!(empty.countries.is_empty());
        assert!(empty.metrics.is_empty());
    }

    #[test]
    fn blank_names_and_non_finite_values_are_dropped() {
        let resolver = AliasResolver::us_uk();
        let data = merge(
            &resolver,
            vec![batch(
                Provider::Who,
                vec![
                    record("  ", 2022, &[("x", 1.0)]),
                    record("Ghana", 2022, &[("x", f64::NAN), ("y", 2.0)]),
                ],
            )],
        );
        assert_eq!(data.countries, vec!["Ghana".to_string()]);
        assert!(data.value("x", "Ghana").is_none());
        assert_eq!(data.value("y", "Ghana"), Some(2.0));
        assert!(!data.sources["Ghana"].contains_key("x"));
    }

    // ── Overlap report ───────────────────────────────────────────────────────

    #[test]
    fn metric_overlap_counts_providers_not_records() {
        let batches = vec![
            batch(
                Provider::Who,
                vec![
                    record("A", 2022, &[("life_expectancy", 1.0)]),
                    record("B", 2022, &[("life_expectancy", 2.0)]),
                ],
            ),
            batch(Provider::WorldBank, vec![record("A", 2022, &[("life_expectancy", 3.0)])]),
            batch(Provider::Un, vec![record("A", 2022, &[("hdi", 0.9)])]),
        ];
        let overlap = metric_overlap(&batches);
        assert_eq!(overlap["life_expectancy"], 2);
        assert_eq!(overlap["hdi"], 1);
    }
}
