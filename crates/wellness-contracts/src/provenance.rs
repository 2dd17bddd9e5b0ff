//! Provenance classification of metric values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How much a metric value can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProvenanceKind {
    /// Published by an attributable source.
    Real,
    /// Attributable source, but the figure is modelled or interpolated.
    Estimated,
    /// Fabricated, placeholder, derived, or unattributed.
    Mock,
}

impl ProvenanceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ProvenanceKind::Real => "real",
            ProvenanceKind::Estimated => "estimated",
            ProvenanceKind::Mock => "mock",
        }
    }
}

impl fmt::Display for ProvenanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-kind value counts over an annotated dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvenanceSummary {
    pub real: usize,
    pub estimated: usize,
    pub mock: usize,
}

impl ProvenanceSummary {
    pub fn record(&mut self, kind: ProvenanceKind) {
        match kind {
            ProvenanceKind::Real => self.real += 1,
            ProvenanceKind::Estimated => self.estimated += 1,
            ProvenanceKind::Mock => self.mock += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.real + self.estimated + self.mock
    }
}
