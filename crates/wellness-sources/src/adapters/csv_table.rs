//! HTTP adapter for wide CSV tables.
//!
//! Expected layout, one row per country:
//!
//! ```text
//! country,code,year,life_expectancy,uhc_index
//! Finland,FIN,2021,81.9,86
//! Kenya,KEN,2021,62.7,
//! ```
//!
//! `country` is required. `country_code` (or `code`) and `year` are optional;
//! header matching ignores case. Every other column is a metric. Blank and
//! non-numeric cells are skipped, and rows without a country are dropped.

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use reqwest::Client;
use tracing::{debug, warn};

use wellness_contracts::{
    error::{WellnessError, WellnessResult},
    provider::Provider,
    record::{CountryRawRecord, SourceDescriptor},
};
use wellness_core::traits::SourceAdapter;

use super::get_checked;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Country,
    Code,
    Year,
    Metric,
}

fn classify_header(header: &str) -> Column {
    match header.trim().to_ascii_lowercase().as_str() {
        "country" => Column::Country,
        "country_code" | "code" => Column::Code,
        "year" => Column::Year,
        _ => Column::Metric,
    }
}

/// Parse a wide CSV body into records.
///
/// Every parsed metric is attributed to `source`. Rows without a usable
/// `year` cell take `source.year`, or the current year when that is unset.
pub fn parse_wide_csv(
    provider: Provider,
    body: &str,
    source: &SourceDescriptor,
) -> WellnessResult<Vec<CountryRawRecord>> {
    let parse_error = |reason: String| WellnessError::Parse { provider, reason };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| parse_error(format!("failed to read CSV headers: {e}")))?
        .clone();
    let columns: Vec<Column> = headers.iter().map(classify_header).collect();
    if !columns.contains(&Column::Country) {
        return Err(parse_error("CSV has no 'country' column".to_string()));
    }

    let default_year = source.year.unwrap_or_else(|| Utc::now().year());
    let mut records = Vec::new();

    for (line, row) in reader.records().enumerate() {
        let row = row.map_err(|e| parse_error(format!("bad CSV row {}: {e}", line + 2)))?;

        let mut country = None;
        let mut code = None;
        let mut year = default_year;
        let mut metrics = Vec::new();

        for ((column, header), cell) in columns.iter().zip(headers.iter()).zip(row.iter()) {
            if cell.is_empty() {
                continue;
            }
            match column {
                Column::Country => country = Some(cell),
                Column::Code => code = Some(cell),
                Column::Year => match cell.parse::<i32>() {
                    Ok(y) => year = y,
                    Err(_) => warn!(provider = %provider, row = line + 2, value = cell, "unparseable year; using default"),
                },
                Column::Metric => match cell.parse::<f64>() {
                    Ok(v) if v.is_finite() => metrics.push((header, v)),
                    _ => debug!(provider = %provider, row = line + 2, metric = header, "skipping non-numeric cell"),
                },
            }
        }

        let Some(country) = country else {
            warn!(provider = %provider, row = line + 2, "skipping row without a country");
            continue;
        };

        let mut record = CountryRawRecord::new(country, year);
        if let Some(code) = code {
            record = record.with_code(code);
        }
        for (metric, value) in metrics {
            record = record.with_metric(metric, value, source.clone());
        }
        records.push(record);
    }

    Ok(records)
}

pub struct HttpCsvAdapter {
    provider: Provider,
    url: String,
    source: SourceDescriptor,
    http: Client,
}

impl HttpCsvAdapter {
    pub fn new(provider: Provider, url: impl Into<String>, source: SourceDescriptor, http: Client) -> Self {
        Self {
            provider,
            url: url.into(),
            source,
            http,
        }
    }
}

#[async_trait]
impl SourceAdapter for HttpCsvAdapter {
    fn provider(&self) -> Provider {
        self.provider
    }

    async fn fetch(&self) -> WellnessResult<Vec<CountryRawRecord>> {
        let response = get_checked(&self.http, self.provider, &self.url).await?;
        let body = response.text().await.map_err(|e| WellnessError::AdapterFailed {
            provider: self.provider,
            reason: format!("failed to read body from {}: {}", self.url, e),
        })?;
        let records = parse_wide_csv(self.provider, &body, &self.source)?;
        debug!(provider = %self.provider, url = %self.url, records = records.len(), "fetched CSV records");
        Ok(records)
    }
}
