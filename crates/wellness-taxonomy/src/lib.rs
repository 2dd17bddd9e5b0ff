//! # wellness-taxonomy
//!
//! The static lookup tables of the wellness pipeline, declared in TOML.
//!
//! ## Overview
//!
//! [`TomlTaxonomy`] implements both
//! [`CountryResolver`](wellness_core::traits::CountryResolver) and
//! [`MetricCatalog`](wellness_core::traits::MetricCatalog). It is loaded once
//! at startup and never mutated. A default table set is compiled into the
//! crate; a deployment can supply its own file instead.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use wellness_taxonomy::TomlTaxonomy;
//!
//! let taxonomy = TomlTaxonomy::builtin()?;
//! // Pass `Arc::new(taxonomy)` to `wellness_core::Pipeline::new(...)` twice.
//! ```

pub mod config;
pub mod taxonomy;

pub use config::TaxonomyConfig;
pub use taxonomy::TomlTaxonomy;

// ── Tests ─────────────────────────────────────────────────────────────────────
