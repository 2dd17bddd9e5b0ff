//! Error types for the wellness data pipeline.
//!
//! Adapter-level variants are normally absorbed at the fetch barrier and
//! logged; only pipeline and configuration errors reach callers.

use thiserror::Error;

use crate::provider::Provider;

/// The unified error type for the pipeline.
#[derive(Debug, Error)]
pub enum WellnessError {
    /// A source adapter could not fetch its data.
    #[error("{provider} adapter failed: {reason}")]
    AdapterFailed { provider: Provider, reason: String },

    /// A source adapter did not answer within its time budget.
    #[error("{provider} adapter timed out after {timeout_ms} ms")]
    AdapterTimeout { provider: Provider, timeout_ms: u64 },

    /// A provider payload could not be decoded.
    #[error("failed to parse {provider} payload: {reason}")]
    Parse { provider: Provider, reason: String },

    /// A transform stage failed. Nothing is cached when this happens.
    #[error("pipeline stage '{stage}' failed: {reason}")]
    PipelineFailed { stage: String, reason: String },

    /// Every provider came back empty.
    #[error("no provider returned any records")]
    NoData,

    /// A configuration value or table is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },
}

impl WellnessError {
    /// Short machine-readable label for the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            WellnessError::AdapterFailed { .. } => "adapter_failed",
            WellnessError::AdapterTimeout { .. } => "adapter_timeout",
            WellnessError::Parse { .. } => "parse_error",
            WellnessError::PipelineFailed { .. } => "pipeline_failed",
            WellnessError::NoData => "no_data",
            WellnessError::ConfigError { .. } => "config_error",
        }
    }
}

/// Convenience alias used throughout the wellness crates.
pub type WellnessResult<T> = Result<T, WellnessError>;
