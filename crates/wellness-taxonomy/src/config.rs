//! Taxonomy configuration schema.
//!
//! A `TaxonomyConfig` is deserialized from TOML and holds three immutable
//! tables: country aliases, metric categories (in declaration order), and
//! documented metric units.
//!
//! ```toml
//! [aliases]
//! "USA" = "United States"
//!
//! [[categories]]
//! name = "health"
//! metrics = ["life_expectancy", "uhc_index"]
//!
//! [[units]]
//! metric = "life_expectancy"
//! unit = "years"
//! ```

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use wellness_contracts::catalog::{MetricCategory, MetricUnit};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyConfig {
    /// Provider spelling → canonical country name.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,

    #[serde(default)]
    pub categories: Vec<MetricCategory>,

    #[serde(default)]
    pub units: Vec<MetricUnit>,
}

impl TaxonomyConfig {
    /// Check the tables for problems that would make lookups ambiguous.
    ///
    /// Returns one message per problem; an empty list means the config is
    /// usable.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        for (alias, canonical) in &self.aliases {
            if alias.trim().is_empty() {
                problems.push("alias table contains an empty key".to_string());
            }
            if canonical.trim().is_empty() {
                problems.push(format!("alias '{alias}' maps to an empty name"));
                continue;
            }
            // Lookups are single-step, so a canonical name that is itself
            // remapped would break idempotence.
            if let Some(next) = self.aliases.get(canonical) {
                if next != canonical {
                    problems.push(format!(
                        "alias '{alias}' maps to '{canonical}', which is itself an alias for '{next}'"
                    ));
                }
            }
        }

        let mut names = BTreeSet::new();
        for category in &self.categories {
            if category.name.trim().is_empty() {
                problems.push("category with an empty name".to_string());
            } else if !names.insert(category.name.as_str()) {
                problems.push(format!("category '{}' is declared twice", category.name));
            }
        }

        let mut metrics = BTreeSet::new();
        for unit in &self.units {
            if !metrics.insert(unit.metric.as_str()) {
                problems.push(format!("unit for metric '{}' is declared twice", unit.metric));
            }
        }

        problems
    }
}
