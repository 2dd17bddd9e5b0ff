//! Long-format CSV export: one row per (country, metric) value.

use std::io::Write;

use serde::Serialize;

use wellness_contracts::{
    dataset::RawMergedData,
    error::{WellnessError, WellnessResult},
    provenance::ProvenanceKind,
};
use wellness_core::provenance::classify;

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    country: &'a str,
    country_code: Option<&'a str>,
    metric: &'a str,
    value: f64,
    year: Option<i32>,
    source_type: ProvenanceKind,
    source_name: Option<&'a str>,
    source_url: Option<&'a str>,
    source_year: Option<i32>,
}

/// Write every value in `data` as CSV, ordered by country then metric key.
///
/// Returns the number of data rows written.
pub fn write_csv<W: Write>(data: &RawMergedData, out: W) -> WellnessResult<usize> {
    let export_error = |reason: String| WellnessError::PipelineFailed {
        stage: "export".to_string(),
        reason,
    };

    let mut writer = csv::Writer::from_writer(out);
    let records = data.metric_records();
    for record in &records {
        let source = record.source.as_ref();
        writer
            .serialize(ExportRow {
                country: &record.country,
                country_code: record.country_code.as_deref(),
                metric: &record.metric_key,
                value: record.value,
                year: record.year,
                source_type: classify(source),
                source_name: source.map(|s| s.name.as_str()),
                source_url: source.and_then(|s| s.url.as_deref()),
                source_year: source.and_then(|s| s.year),
            })
            .map_err(|e| export_error(format!("failed to write CSV row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| export_error(format!("failed to flush CSV output: {e}")))?;
    Ok(records.len())
}
