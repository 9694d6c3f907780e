//! Configuration for the extraction pipeline

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum time for the document download (seconds)
    pub fetch_timeout_secs: u64,

    /// Maximum time for a single model call (seconds)
    pub model_timeout_secs: u64,

    /// Maximum accepted document size (bytes)
    pub max_document_bytes: usize,

    /// Cap on concurrent outbound model calls
    pub max_concurrent_extractions: usize,
}

impl PipelineConfig {
    /// Get the fetch timeout as a Duration
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Get the model-call timeout as a Duration
    pub fn model_timeout(&self) -> Duration {
        Duration::from_secs(self.model_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.fetch_timeout_secs == 0 {
            return Err("fetch_timeout_secs must be greater than 0".to_string());
        }
        if self.model_timeout_secs == 0 {
            return Err("model_timeout_secs must be greater than 0".to_string());
        }
        if self.max_document_bytes == 0 {
            return Err("max_document_bytes must be greater than 0".to_string());
        }
        if self.max_concurrent_extractions == 0 {
            return Err("max_concurrent_extractions must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for PipelineConfig {
    /// Defaults sized for single-document legal filings
    fn default() -> Self {
        Self {
            fetch_timeout_secs: 30,
            model_timeout_secs: 180,
            max_document_bytes: 50 * 1024 * 1024,
            max_concurrent_extractions: 4,
        }
    }
}
