//! TOML-driven taxonomy implementation.
//!
//! `TomlTaxonomy` loads a `TaxonomyConfig` from a TOML string or file,
//! validates it, and implements both `CountryResolver` and `MetricCatalog`
//! from wellness-core. Once built it is read-only and can be shared behind
//! an `Arc`.

use std::{collections::HashMap, path::Path};

use tracing::debug;

use wellness_contracts::{
    catalog::{MetricCategory, MetricUnit},
    error::{WellnessError, WellnessResult},
};
use wellness_core::traits::{CountryResolver, MetricCatalog};

use crate::config::TaxonomyConfig;

const BUILTIN_TOML: &str = include_str!("../taxonomy/default.toml");

/// Country aliases, metric categories, and units loaded from TOML.
///
/// ```rust,ignore
/// use wellness_taxonomy::TomlTaxonomy;
///
/// let taxonomy = TomlTaxonomy::from_file(Path::new("taxonomy.toml"))?;
/// assert_eq!(taxonomy.standardize("USA"), "United States");
/// ```
#[derive(Debug)]
pub struct TomlTaxonomy {
    config: TaxonomyConfig,
    aliases: HashMap<String, String>,
}

impl TomlTaxonomy {
    /// The taxonomy shipped with the crate.
    pub fn builtin() -> WellnessResult<Self> {
        Self::from_toml_str(BUILTIN_TOML)
    }

    /// Parse `s` as TOML and build a validated taxonomy.
    ///
    /// Returns `WellnessError::ConfigError` if the TOML is malformed, does not
    /// match `TaxonomyConfig`, or fails validation.
    pub fn from_toml_str(s: &str) -> WellnessResult<Self> {
        let config: TaxonomyConfig = toml::from_str(s).map_err(|e| WellnessError::ConfigError {
            reason: format!("failed to parse taxonomy TOML: {}", e),
        })?;
        Self::from_config(config)
    }

    /// Read the file at `path` and parse it as a taxonomy.
    pub fn from_file(path: &Path) -> WellnessResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| WellnessError::ConfigError {
            reason: format!("failed to read taxonomy file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_config(config: TaxonomyConfig) -> WellnessResult<Self> {
        let problems = config.problems();
        if !problems.is_empty() {
            return Err(WellnessError::ConfigError {
                reason: format!("invalid taxonomy: {}", problems.join("; ")),
            });
        }

        let aliases = config
            .aliases
            .iter()
            .map(|(alias, canonical)| (alias.clone(), canonical.clone()))
            .collect();
        debug!(
            aliases = config.aliases.len(),
            categories = config.categories.len(),
            units = config.units.len(),
            "taxonomy loaded"
        );
        Ok(Self { config, aliases })
    }

    pub fn config(&self) -> &TaxonomyConfig {
        &self.config
    }

    /// Every canonical name the alias table resolves to, deduplicated.
    pub fn canonical_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.config.aliases.values().map(String::as_str).collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Name of the category a metric belongs to, if any.
    pub fn category_of(&self, metric: &str) -> Option<&str> {
        self.config
            .categories
            .iter()
            .find(|c| c.metrics.iter().any(|m| m == metric))
            .map(|c| c.name.as_str())
    }
}

impl CountryResolver for TomlTaxonomy {
    /// Exact-match lookup; unknown names are returned unchanged.
    fn standardize(&self, raw: &str) -> String {
        match self.aliases.get(raw) {
            Some(canonical) => canonical.clone(),
            None => raw.to_string(),
        }
    }
}

impl MetricCatalog for TomlTaxonomy {
    fn categories(&self) -> &[MetricCategory] {
        &self.config.categories
    }

    fn units(&self) -> &[MetricUnit] {
        &self.config.units
    }
}
