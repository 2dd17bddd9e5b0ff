//! Metric taxonomy types shared between the taxonomy loader and the pipeline.

use serde::{Deserialize, Serialize};

/// A named group of metric keys (e.g. "health").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricCategory {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub metrics: Vec<String>,
}

/// Documented unit of a metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricUnit {
    pub metric: String,
    pub unit: String,
    #[serde(default)]
    pub description: String,
}
