//! Provenance marking: the transform from `RawMergedData` to
//! `AnnotatedMergedData`.
//!
//! Classification precedence for one (country, metric):
//!
//! 1. no source entry                   → mock
//! 2. source name contains "Simulated"  → mock
//! 3. no (or blank) URL, or URL contains example.com → mock
//! 4. URL present and `simulated` flag  → estimated
//! 5. otherwise                         → real

use std::collections::BTreeMap;

use tracing::debug;

use wellness_contracts::{
    dataset::{AnnotatedMergedData, AnnotatedSource, RawMergedData, TaggedValue},
    provenance::ProvenanceKind,
    record::SourceDescriptor,
};

const SIMULATED_MARKER: &str = "Simulated";
const PLACEHOLDER_HOST: &str = "example.com";

/// Classify a single source descriptor.
pub fn classify(source: Option<&SourceDescriptor>) -> ProvenanceKind {
    let Some(source) = source else {
        return ProvenanceKind::Mock;
    };
    if source.name.contains(SIMULATED_MARKER) {
        return ProvenanceKind::Mock;
    }
    match source.url.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
        None => ProvenanceKind::Mock,
        Some(url) if url.contains(PLACEHOLDER_HOST) => ProvenanceKind::Mock,
        Some(_) if source.simulated => ProvenanceKind::Estimated,
        Some(_) => ProvenanceKind::Real,
    }
}

/// Tag every metric value and every source entry with its provenance.
pub fn mark_provenance(data: RawMergedData) -> AnnotatedMergedData {
    let RawMergedData {
        countries,
        metrics,
        sources,
        country_codes,
        years,
        categorized_metrics,
    } = data;

    let metrics = metrics
        .into_iter()
        .map(|(key, values)| {
            let tagged: BTreeMap<String, TaggedValue> = values
                .into_iter()
                .map(|(country, value)| {
                    let source = sources.get(&country).and_then(|s| s.get(&key));
                    let source_type = classify(source);
                    (country, TaggedValue { value, source_type })
                })
                .collect();
            (key, tagged)
        })
        .collect();

    let sources = sources
        .into_iter()
        .map(|(country, per_metric)| {
            let annotated: BTreeMap<String, AnnotatedSource> = per_metric
                .into_iter()
                .map(|(key, source)| {
                    let source_type = classify(Some(&source));
                    let annotated = AnnotatedSource {
                        name: source.name,
                        url: source.url,
                        year: source.year,
                        source_type,
                    };
                    (key, annotated)
                })
                .collect();
            (country, annotated)
        })
        .collect();

    let out = AnnotatedMergedData {
        countries,
        metrics,
        sources,
        categorized_metrics,
        country_codes,
        years,
    };
    let summary = out.provenance_summary();
    debug!(
        real = summary.real,
        estimated = summary.estimated,
        mock = summary.mock,
        "provenance marked"
    );
    out
}
