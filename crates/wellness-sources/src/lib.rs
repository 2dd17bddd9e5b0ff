//! # wellness-sources
//!
//! Data producers for the wellness pipeline.
//!
//! Every adapter implements
//! [`SourceAdapter`](wellness_core::traits::SourceAdapter) and reports in its
//! provider's own vocabulary: country spellings are left for the resolver,
//! and source descriptors say only what the provider published. Three kinds
//! are available:
//!
//! - [`StaticTableAdapter`] serves an in-memory table (the built-in tables
//!   live in [`mock_data`])
//! - [`HttpJsonAdapter`] fetches `CountryRawRecord` JSON
//! - [`HttpCsvAdapter`] fetches a wide CSV table
//!
//! [`build_adapters`] turns `SourceConfig` entries into adapters.

pub mod adapters;
pub mod config;
pub mod mock_data;
pub mod registry;

pub use adapters::{HttpCsvAdapter, HttpJsonAdapter, StaticTableAdapter};
pub use config::SourceConfig;
pub use registry::build_adapters;

// ── Tests ─────────────────────────────────────────────────────────────────────
