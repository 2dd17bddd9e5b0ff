use std::collections::HashSet;

use proptest::prelude::*;
use proptest::test_runner::Config;
use wellness_contracts::{
    provider::{Provider, PROVIDER_PRIORITY},
    record::{CountryRawRecord, ProviderBatch, SourceDescriptor},
};
use wellness_core::{merge::merge, traits::CountryResolver};

struct Aliases;

impl CountryResolver for Aliases {
    fn standardize(&self, raw: &str) -> String {
        match raw {
            "USA" | "US" | "United States of America" => "United States".to_string(),
            "UK" => "United Kingdom".to_string(),
            other => other.to_string(),
        }
    }
}

const NAMES: &[&str] = &[
    "USA",
    "US",
    "United States of America",
    "United States",
    "UK",
    "United Kingdom",
    "Finland",
    "Kenya",
];
const KEYS: &[&str] = &["happiness_score", "life_expectancy", "uhc_index"];

fn record_strategy() -> impl Strategy<Value = CountryRawRecord> {
    (
        0..NAMES.len(),
        2015..2025i32,
        prop::collection::vec((0..KEYS.len(), 0.0..100.0f64), 0..4),
    )
        .prop_map(|(name, year, metrics)| {
            metrics.into_iter().fold(
                CountryRawRecord::new(NAMES[name], year),
                |record, (key, value)| {
                    record.with_metric(KEYS[key], value, SourceDescriptor::new("P", "https://p.org"))
                },
            )
        })
}

fn batches_strategy() -> impl Strategy<Value = Vec<ProviderBatch>> {
    prop::collection::vec(
        (0..PROVIDER_PRIORITY.len(), prop::collection::vec(record_strategy(), 0..5)),
        0..5,
    )
    .prop_map(|raw| {
        raw.into_iter()
            .map(|(idx, records)| ProviderBatch::new(PROVIDER_PRIORITY[idx], records))
            .collect()
    })
}

/// At most one batch per provider, so priority fully determines overlay order.
fn distinct_provider_batches() -> impl Strategy<Value = Vec<ProviderBatch>> {
    (
        prop::sample::subsequence(PROVIDER_PRIORITY.to_vec(), 0..=PROVIDER_PRIORITY.len()),
        prop::collection::vec(prop::collection::vec(record_strategy(), 0..5), 5),
    )
        .prop_map(|(providers, records)| {
            providers
                .into_iter()
                .zip(records)
                .map(|(provider, records)| ProviderBatch::new(provider, records))
                .collect()
        })
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn merged_countries_are_unique_and_canonical(batches in batches_strategy()) {
        let data = merge(&Aliases, batches);
        let unique: HashSet<&String> = data.countries.iter().collect();
        prop_assert_eq!(unique.len(), data.countries.len());
        for country in &data.countries {
            prop_assert_eq!(Aliases.standardize(country), country.clone());
        }
    }

    #[test]
    fn every_value_belongs_to_a_listed_country(batches in batches_strategy()) {
        let data = merge(&Aliases, batches);
        for values in data.metrics.values() {
            for country in values.keys() {
                prop_assert!(data.countries.contains(country));
            }
        }
    }

    #[test]
    fn merge_is_deterministic(batches in batches_strategy()) {
        let first = merge(&Aliases, batches.clone());
        let second = merge(&Aliases, batches);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn batch_arrival_order_does_not_change_values(batches in distinct_provider_batches()) {
        let mut reversed = batches.clone();
        reversed.reverse();
        let forward = merge(&Aliases, batches);
        let backward = merge(&Aliases, reversed);
        prop_assert_eq!(forward.metrics, backward.metrics);
        prop_assert_eq!(forward.years, backward.years);
    }
}

#[test]
fn higher_priority_provider_wins_conflicts() {
    let low = ProviderBatch::new(
        Provider::Who,
        vec![CountryRawRecord::new("USA", 2023).with_metric(
            "life_expectancy",
            76.0,
            SourceDescriptor::new("WHO", "https://who.int"),
        )],
    );
    let high = ProviderBatch::new(
        Provider::WorldBank,
        vec![CountryRawRecord::new("United States of America", 2023).with_metric(
            "life_expectancy",
            77.0,
            SourceDescriptor::new("World Bank", "https://data.worldbank.org"),
        )],
    );

    let data = merge(&Aliases, vec![high, low]);
    assert_eq!(data.value("life_expectancy", "United States"), Some(77.0));
}
