//! Hand-written doubles for the trait seams, shared by the unit tests.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use wellness_contracts::{
    cache::CacheEntry,
    catalog::{MetricCategory, MetricUnit},
    error::{WellnessError, WellnessResult},
    provider::Provider,
    record::{CountryRawRecord, SourceDescriptor},
};

use crate::traits::{Clock, CountryResolver, DatasetCache, MetricCatalog, SourceAdapter};

// ── Resolver ─────────────────────────────────────────────────────────────────

pub struct AliasResolver {
    aliases: HashMap<String, String>,
}

impl AliasResolver {
    pub fn us_uk() -> Self {
        let mut aliases = HashMap::new();
        for alias in ["USA", "US", "United States of America"] {
            aliases.insert(alias.to_string(), "United States".to_string());
        }
        aliases.insert("UK".to_string(), "United Kingdom".to_string());
        aliases.insert("Republic of Korea".to_string(), "South Korea".to_string());
        Self { aliases }
    }
}

impl CountryResolver for AliasResolver {
    fn standardize(&self, raw: &str) -> String {
        self.aliases
            .get(raw)
            .cloned()
            .unwrap_or_else(|| raw.to_string())
    }
}

// ── Catalog ──────────────────────────────────────────────────────────────────

pub struct StaticCatalog {
    categories: Vec<MetricCategory>,
    units: Vec<MetricUnit>,
}

impl StaticCatalog {
    pub fn basic() -> Self {
        let category = |name: &str, metrics: &[&str]| MetricCategory {
            name: name.to_string(),
            description: String::new(),
            metrics: metrics.iter().map(|m| m.to_string()).collect(),
        };
        Self {
            categories: vec![
                category("happiness", &["happiness_score", "social_support"]),
                category(
                    "health",
                    &["life_expectancy", "uhc_index", "health_expenditure_pct_gdp"],
                ),
                category("work", &["working_hours", "leisure_time"]),
            ],
            units: vec![MetricUnit {
                metric: "life_expectancy".to_string(),
                unit: "years".to_string(),
                description: String::new(),
            }],
        }
    }
}

impl MetricCatalog for StaticCatalog {
    fn categories(&self) -> &[MetricCategory] {
        &self.categories
    }

    fn units(&self) -> &[MetricUnit] {
        &self.units
    }
}

// ── Adapter ──────────────────────────────────────────────────────────────────

/// An adapter serving a fixed record list and counting its calls.
pub struct CountingAdapter {
    provider: Provider,
    records: Vec<CountryRawRecord>,
    pub calls: Arc<AtomicUsize>,
    fail: bool,
    delay: Option<Duration>,
}

impl CountingAdapter {
    pub fn new(provider: Provider, records: Vec<CountryRawRecord>) -> Self {
        Self {
            provider,
            records,
            calls: Arc::new(AtomicUsize::new(0)),
            fail: false,
            delay: None,
        }
    }

    pub fn failing(provider: Provider) -> Self {
        Self {
            fail: true,
            ..Self::new(provider, vec![])
        }
    }

    pub fn slow(provider: Provider, records: Vec<CountryRawRecord>, delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new(provider, records)
        }
    }
}

#[async_trait]
impl SourceAdapter for CountingAdapter {
    fn provider(&self) -> Provider {
        self.provider
    }

    async fn fetch(&self) -> WellnessResult<Vec<CountryRawRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(WellnessError::AdapterFailed {
                provider: self.provider,
                reason: "connection refused".to_string(),
            });
        }
        Ok(self.records.clone())
    }
}

// ── Clock ────────────────────────────────────────────────────────────────────

/// A clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn at_epoch() -> Self {
        Self {
            now: Mutex::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
        }
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// A clock driven by tokio's (pausable) time, so it moves while adapters
/// sleep.
pub struct TokioClock {
    base: DateTime<Utc>,
    start: tokio::time::Instant,
}

impl TokioClock {
    pub fn at_epoch() -> Self {
        Self {
            base: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            start: tokio::time::Instant::now(),
        }
    }
}

impl Clock for TokioClock {
    fn now(&self) -> DateTime<Utc> {
        self.base + chrono::Duration::from_std(self.start.elapsed()).unwrap()
    }
}

// ── Cache ────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct CellCache {
    entry: Mutex<Option<CacheEntry>>,
}

impl DatasetCache for CellCache {
    fn load(&self) -> Option<CacheEntry> {
        self.entry.lock().unwrap().clone()
    }

    fn store(&self, entry: CacheEntry) {
        *self.entry.lock().unwrap() = Some(entry);
    }

    fn clear(&self) {
        *self.entry.lock().unwrap() = None;
    }
}

// ── Record helpers ───────────────────────────────────────────────────────────

pub fn real(name: &str) -> SourceDescriptor {
    SourceDescriptor::new(name, format!("https://{}.org", name.to_lowercase()))
}

pub fn record(country: &str, year: i32, metrics: &[(&str, f64)]) -> CountryRawRecord {
    metrics
        .iter()
        .fold(CountryRawRecord::new(country, year), |r, (k, v)| {
            r.with_metric(k, *v, real("Test"))
        })
}
