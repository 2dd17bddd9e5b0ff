//! # wellness-contracts
//!
//! Shared types, records, and contracts for the wellness data pipeline.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate, only data definitions and error types.

pub mod cache;
pub mod catalog;
pub mod dataset;
pub mod error;
pub mod provenance;
pub mod provider;
pub mod query;
pub mod record;
