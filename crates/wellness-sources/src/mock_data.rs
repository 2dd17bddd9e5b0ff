//! Built-in provider tables.
//!
//! All figures in this module are hardcoded approximations. No external
//! systems are contacted. Each table spells country names the way its
//! provider does, so the alias table has real work to do, and each mixes
//! attributed, estimated, simulated, and placeholder sources so every
//! provenance class shows up in a default run.

use wellness_contracts::{
    provider::Provider,
    record::{CountryRawRecord, SourceDescriptor},
};

/// Marks a cell the provider does not report.
const NA: f64 = f64::NAN;

struct Table {
    year: i32,
    metrics: &'static [&'static str],
    rows: &'static [(&'static str, Option<&'static str>, &'static [f64])],
    source: fn(&str) -> SourceDescriptor,
}

impl Table {
    fn records(&self) -> Vec<CountryRawRecord> {
        self.rows
            .iter()
            .map(|(country, code, values)| {
                let mut record = CountryRawRecord::new(*country, self.year);
                if let Some(code) = code {
                    record = record.with_code(*code);
                }
                self.metrics
                    .iter()
                    .zip(values.iter())
                    .filter(|(_, value)| !value.is_nan())
                    .fold(record, |record, (metric, value)| {
                        record.with_metric(metric, *value, (self.source)(metric))
                    })
            })
            .collect()
    }
}

/// The built-in table for `provider`.
pub fn records_for(provider: Provider) -> Vec<CountryRawRecord> {
    match provider {
        Provider::Who => WHO.records(),
        Provider::Oecd => OECD.records(),
        Provider::Un => UN.records(),
        Provider::WorldBank => WORLD_BANK.records(),
        Provider::WorldHappiness => WORLD_HAPPINESS.records(),
    }
}

// ── WHO ───────────────────────────────────────────────────────────────────────

const WHO: Table = Table {
    year: 2021,
    metrics: &[
        "life_expectancy",
        "healthy_life_expectancy",
        "uhc_index",
        "health_expenditure_pct_gdp",
        "mental_health_prevalence",
    ],
    rows: &[
        ("United States of America", Some("USA"), &[76.4, 63.9, 86.0, 17.4, 19.9]),
        ("United Kingdom of Great Britain and Northern Ireland", Some("GBR"), &[80.7, 70.1, 88.0, 12.4, 17.1]),
        ("Republic of Korea", Some("KOR"), &[83.7, 73.1, 89.0, 9.3, 13.2]),
        ("Russian Federation", Some("RUS"), &[69.4, 62.3, 79.0, 7.4, NA]),
        ("Finland", Some("FIN"), &[81.9, 71.0, 86.0, 9.7, 18.8]),
        ("Japan", Some("JPN"), &[84.5, 74.1, 85.0, 10.8, 11.6]),
        ("Germany", Some("DEU"), &[80.6, 70.9, 88.0, 12.9, 16.4]),
        ("Brazil", Some("BRA"), &[72.8, 64.3, 80.0, 9.9, 15.0]),
        ("India", Some("IND"), &[67.2, 58.1, 63.0, 3.3, NA]),
        ("Kenya", Some("KEN"), &[62.7, 55.0, 53.0, 4.3, NA]),
    ],
    source: who_source,
};

fn who_source(metric: &str) -> SourceDescriptor {
    match metric {
        // Modelled from survey data rather than measured.
        "mental_health_prevalence" => {
            SourceDescriptor::new("WHO Mental Health Atlas", "https://www.who.int/data/gho")
                .with_year(2020)
                .simulated()
        }
        _ => SourceDescriptor::new("WHO Global Health Observatory", "https://www.who.int/data/gho")
            .with_year(2021),
    }
}

// ── OECD ──────────────────────────────────────────────────────────────────────

const OECD: Table = Table {
    year: 2022,
    metrics: &["working_hours", "leisure_time", "life_satisfaction", "social_support"],
    rows: &[
        ("United States", Some("USA"), &[1811.0, 82.0, 6.9, 0.90]),
        ("United Kingdom", Some("GBR"), &[1532.0, 95.0, 6.8, 0.93]),
        ("Korea", Some("KOR"), &[1901.0, 68.0, 5.8, 0.80]),
        ("Finland", Some("FIN"), &[1518.0, 104.0, 7.9, 0.95]),
        ("Japan", Some("JPN"), &[1607.0, 71.0, 6.1, 0.89]),
        ("Germany", Some("DEU"), &[1341.0, 110.0, 7.0, 0.91]),
        ("Denmark", Some("DNK"), &[1380.0, 112.0, 7.6, 0.95]),
    ],
    source: oecd_source,
};

fn oecd_source(metric: &str) -> SourceDescriptor {
    match metric {
        "leisure_time" => {
            SourceDescriptor::new("Simulated Leisure Survey", "https://stats.oecd.org").with_year(2022)
        }
        "social_support" => SourceDescriptor::new("OECD Better Life Index", "https://www.oecdbetterlifeindex.org")
            .with_year(2022)
            .simulated(),
        _ => SourceDescriptor::new("OECD.Stat", "https://stats.oecd.org").with_year(2022),
    }
}

// ── UN ────────────────────────────────────────────────────────────────────────

const UN: Table = Table {
    year: 2022,
    metrics: &["hdi", "education_index", "gender_inequality_index"],
    rows: &[
        ("United States of America", None, &[0.921, 0.900, 0.180]),
        ("United Kingdom", None, &[0.940, 0.928, 0.098]),
        ("Republic of Korea", None, &[0.929, 0.886, 0.062]),
        ("Russian Federation", None, &[0.821, 0.832, 0.188]),
        ("Finland", None, &[0.942, 0.931, 0.032]),
        ("Japan", None, &[0.920, 0.850, 0.078]),
        ("Germany", None, &[0.950, 0.944, 0.071]),
        ("Brazil", None, &[0.760, 0.690, 0.391]),
        ("India", None, &[0.644, 0.552, 0.437]),
        ("Kenya", None, &[0.601, 0.548, 0.533]),
    ],
    source: un_source,
};

fn un_source(_metric: &str) -> SourceDescriptor {
    SourceDescriptor::new("UNDP Human Development Report", "https://hdr.undp.org/data-center").with_year(2022)
}

// ── World Bank ────────────────────────────────────────────────────────────────

const WORLD_BANK: Table = Table {
    year: 2022,
    metrics: &[
        "gdp_per_capita",
        "unemployment_rate",
        "health_expenditure_pct_gdp",
        "life_expectancy",
    ],
    rows: &[
        ("United States", Some("USA"), &[76399.0, 3.6, 16.6, 77.4]),
        ("United Kingdom", Some("GBR"), &[46125.0, 3.7, 11.3, 80.7]),
        ("Korea, Rep.", Some("KOR"), &[32423.0, 2.9, 9.7, 82.7]),
        ("Russian Federation", Some("RUS"), &[15271.0, 3.9, NA, 72.5]),
        ("Finland", Some("FIN"), &[50536.0, 6.8, 10.0, 81.2]),
        ("Japan", Some("JPN"), &[34017.0, 2.6, 10.9, 84.0]),
        ("Germany", Some("DEU"), &[48718.0, 3.1, 12.7, 80.7]),
        ("Brazil", Some("BRA"), &[8918.0, 9.2, 9.9, 73.4]),
        ("India", Some("IND"), &[2389.0, 7.3, 3.3, 67.7]),
        ("Kenya", Some("KEN"), &[2099.0, 5.6, 4.3, 62.1]),
        ("Egypt, Arab Rep.", Some("EGY"), &[4295.0, 7.3, 4.6, 70.2]),
    ],
    source: world_bank_source,
};

fn world_bank_source(metric: &str) -> SourceDescriptor {
    match metric {
        "unemployment_rate" => {
            SourceDescriptor::new("World Bank WDI (ILO modelled estimate)", "https://data.worldbank.org")
                .with_year(2022)
                .simulated()
        }
        _ => SourceDescriptor::new("World Bank World Development Indicators", "https://data.worldbank.org")
            .with_year(2022),
    }
}

// ── World Happiness Report ────────────────────────────────────────────────────

const WORLD_HAPPINESS: Table = Table {
    year: 2023,
    metrics: &[
        "happiness_score",
        "social_support",
        "freedom",
        "generosity",
        "corruption_perception",
    ],
    rows: &[
        ("United States", None, &[6.89, 0.92, 0.79, 0.16, 0.70]),
        ("United Kingdom", None, &[6.75, 0.93, 0.85, 0.17, 0.55]),
        ("South Korea", None, &[5.95, 0.80, 0.72, 0.01, 0.64]),
        ("Russia", None, &[5.66, 0.90, 0.73, -0.09, 0.82]),
        ("Finland", None, &[7.80, 0.97, 0.96, -0.02, 0.18]),
        ("Japan", None, &[6.13, 0.88, 0.80, -0.19, 0.62]),
        ("Germany", None, &[6.89, 0.90, 0.85, 0.08, 0.46]),
        ("Brazil", None, &[6.13, 0.86, 0.78, -0.07, 0.76]),
        ("India", None, &[4.04, 0.61, 0.89, 0.05, 0.77]),
        ("Kenya", None, &[4.47, 0.70, 0.81, 0.29, 0.83]),
        ("Denmark", None, &[7.59, 0.95, 0.94, 0.05, 0.18]),
    ],
    source: world_happiness_source,
};

fn world_happiness_source(metric: &str) -> SourceDescriptor {
    match metric {
        // Placeholder until the dataset licence is sorted out.
        "corruption_perception" => {
            SourceDescriptor::new("World Happiness Report", "https://example.com/whr/corruption")
        }
        _ => SourceDescriptor::new("World Happiness Report", "https://worldhappiness.report/data")
            .with_year(2023),
    }
}
