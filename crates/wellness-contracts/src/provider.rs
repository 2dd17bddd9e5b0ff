//! Data provider identity and merge precedence.
//!
//! Every record entering the pipeline is tagged with the `Provider` that
//! produced it. The merge reduces provider batches in `PROVIDER_PRIORITY`
//! order, so the position of a provider in that list decides which value
//! survives when two providers report the same metric for the same country.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An upstream statistics provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provider {
    /// World Health Organization (Global Health Observatory).
    Who,
    /// Organisation for Economic Co-operation and Development.
    Oecd,
    /// United Nations (UNDP / UN statistics division).
    Un,
    /// World Bank open data.
    WorldBank,
    /// World Happiness Report.
    WorldHappiness,
}

/// Fixed merge order. Later providers overwrite same-key values of earlier ones.
pub const PROVIDER_PRIORITY: [Provider; 5] = [
    Provider::Who,
    Provider::Oecd,
    Provider::Un,
    Provider::WorldBank,
    Provider::WorldHappiness,
];

impl Provider {
    /// Human-readable provider name, used in logs and default source descriptors.
    pub fn display_name(self) -> &'static str {
        match self {
            Provider::Who => "WHO",
            Provider::Oecd => "OECD",
            Provider::Un => "UN",
            Provider::WorldBank => "World Bank",
            Provider::WorldHappiness => "World Happiness Report",
        }
    }

    /// Position of this provider in `PROVIDER_PRIORITY`.
    pub fn priority(self) -> usize {
        PROVIDER_PRIORITY
            .iter()
            .position(|p| *p == self)
            .unwrap_or(PROVIDER_PRIORITY.len())
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
