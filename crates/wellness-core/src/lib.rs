//! # wellness-core
//!
//! The merge, enrichment, and cached query pipeline for multi-source
//! wellness statistics.
//!
//! This crate provides:
//! - The trait seams (`SourceAdapter`, `CountryResolver`, `MetricCatalog`,
//!   `DatasetCache`, `Clock`)
//! - The pure transform stages: merge, categorize, derive, mark provenance
//! - The `Pipeline` that fans out to adapters and runs the stages in order
//! - The `WellnessService` that caches the result and filters it per query
//!
//! ## Usage
//!
//! ```rust,ignore
//! use wellness_core::{Pipeline, WellnessService, traits::SystemClock};
//! ```

pub mod categorize;
pub mod derive;
pub mod filter;
pub mod merge;
pub mod pipeline;
pub mod provenance;
pub mod service;
pub mod standardize;
pub mod traits;

#[cfg(test)]
mod testing;

pub use pipeline::Pipeline;
pub use service::WellnessService;
