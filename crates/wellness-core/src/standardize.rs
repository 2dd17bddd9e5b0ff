//! Country name standardization applied to provider batches and to query
//! parameters.

use wellness_contracts::record::ProviderBatch;

use crate::traits::CountryResolver;

/// Rewrite every record's country name to its canonical form. Surrounding
/// whitespace is dropped before lookup.
pub fn standardize_batch(resolver: &dyn CountryResolver, mut batch: ProviderBatch) -> ProviderBatch {
    for record in &mut batch.records {
        record.country = resolver.standardize(record.country.trim());
    }
    batch
}

/// Standardize a list of names, dropping duplicates that collapse onto the
/// same canonical name. First occurrence wins.
pub fn standardize_names(resolver: &dyn CountryResolver, names: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let canonical = resolver.standardize(name.trim());
        if !out.contains(&canonical) {
            out.push(canonical);
        }
    }
    out
}
