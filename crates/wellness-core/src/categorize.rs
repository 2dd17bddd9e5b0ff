//! Semantic grouping of flat metric keys.

use tracing::debug;

use wellness_contracts::dataset::{CategorizedMetrics, MetricTable, RawMergedData};

use crate::traits::MetricCatalog;

/// Attach `categorized_metrics` according to the catalog's taxonomy.
///
/// Keys listed in a category but absent from the data are skipped. Keys in no
/// category stay in the flat `metrics` map only. Categories with none of
/// their keys present are left out. All other fields are untouched.
pub fn categorize(mut data: RawMergedData, catalog: &dyn MetricCatalog) -> RawMergedData {
    let mut categorized = CategorizedMetrics::new();

    for category in catalog.categories() {
        let mut table = MetricTable::new();
        for key in &category.metrics {
            if let Some(values) = data.metrics.get(key) {
                table.insert(key.clone(), values.clone());
            }
        }
        if table.is_empty() {
            continue;
        }
        debug!(category = %category.name, metrics = table.len(), "category populated");
        categorized.insert(category.name.clone(), table);
    }

    data.categorized_metrics = Some(categorized);
    data
}

#[cfg(test)]
mod tests {
    use wellness_contracts::provider::Provider;
    use wellness_contracts::record::ProviderBatch;

    use super::*;
    use crate::{
        merge::merge,
        testing::{record, AliasResolver, StaticCatalog},
    };

    fn sample() -> RawMergedData {
        merge(
            &AliasResolver::us_uk(),
            vec![ProviderBatch::new(
                Provider::Who,
                vec![
                    record(
                        "Finland",
                        2023,
                        &[("happiness_score", 7.7), ("life_expectancy", 82.0), ("co2", 7.1)],
                    ),
                    record("Chile", 2023, &[("life_expectancy", 80.7)]),
                ],
            )],
        )
    }

    #[test]
    fn present_keys_are_copied_per_category() {
        let data = categorize(sample(), &StaticCatalog::basic());
        let categorized = data.categorized_metrics.as_ref().unwrap();

        assert_eq!(categorized["happiness"]["happiness_score"]["Finland"], 7.7);
        assert_eq!(categorized["health"]["life_expectancy"].len(), 2);
        // social_support and uhc_index are listed but absent.
        assert!(!categorized["happiness"].contains_key("social_support"));
        assert!(!categorized["health"].contains_key("uhc_index"));
    }

    #[test]
    fn uncategorized_keys_stay_flat_and_empty_categories_are_dropped() {
        let data = categorize(sample(), &StaticCatalog::basic());
        let categorized = data.categorized_metrics.as_ref().unwrap();

        assert!(data.metrics.contains_key("co2"));
        assert!(categorized.values().all(|t| !t.contains_key("co2")));
        assert!(!categorized.contains_key("work"));
    }

    #[test]
    fn other_fields_are_untouched() {
        let before = sample();
        let after = categorize(before.clone(), &StaticCatalog::basic());
        assert_eq!(before.countries, after.countries);
        assert_eq!(before.metrics, after.metrics);
        assert_eq!(before.sources, after.sources);
        assert_eq!(before.country_codes, after.country_codes);
    }
}
