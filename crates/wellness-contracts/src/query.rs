//! Caller-facing query parameters.

use serde::{Deserialize, Serialize};

/// A request for a (possibly narrowed) view of the merged dataset.
///
/// `None` for `countries` or `metrics` means "all". Unknown names are not an
/// error; the service drops or falls back as appropriate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellnessQuery {
    pub countries: Option<Vec<String>>,
    pub metrics: Option<Vec<String>>,
    #[serde(default)]
    pub force_refresh: bool,
}

impl WellnessQuery {
    /// A query for everything, served from cache when fresh.
    pub fn all() -> Self {
        Self::default()
    }

    /// Build a query from raw request parameters.
    ///
    /// `countries` and `metrics` are comma-separated; entries are trimmed and
    /// blanks dropped. A list that ends up empty counts as absent. `refresh`
    /// is true only for the literal `"true"`.
    pub fn from_params(
        countries: Option<&str>,
        metrics: Option<&str>,
        refresh: Option<&str>,
    ) -> Self {
        Self {
            countries: countries.and_then(split_list),
            metrics: metrics.and_then(split_list),
            force_refresh: refresh == Some("true"),
        }
    }

    pub fn with_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.countries = Some(countries.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_metrics<I, S>(mut self, metrics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metrics = Some(metrics.into_iter().map(Into::into).collect());
        self
    }

    pub fn refreshed(mut self) -> Self {
        self.force_refresh = true;
        self
    }
}

fn split_list(raw: &str) -> Option<Vec<String>> {
    let items: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}
