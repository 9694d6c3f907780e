//! Environment-sourced configuration for the server.
//!
//! All settings arrive as environment variables and are resolved once
//! at startup into an explicit struct that is passed into the adapter
//! constructors - business logic never reads the environment.

use causa_extractor::PipelineConfig;
use thiserror::Error;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is absent or empty
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// An environment variable could not be parsed
    #[error("Invalid value for {name}: {detail}")]
    InvalidVar {
        /// Variable name
        name: &'static str,
        /// Parse failure detail
        detail: String,
    },
}

/// Server configuration resolved from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default `0.0.0.0`)
    pub bind_address: String,

    /// Bind port (default `8000`)
    pub bind_port: u16,

    /// Gemini API key (required)
    pub gemini_api_key: String,

    /// Gemini model identifier
    pub gemini_model: String,

    /// Pipeline tuning knobs
    pub pipeline: PipelineConfig,
}

impl ServerConfig {
    /// Resolve configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup
    /// (tests inject closures instead of mutating the process env)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let gemini_api_key = lookup("GEMINI_API_KEY")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingVar("GEMINI_API_KEY"))?;

        let gemini_model = lookup("GEMINI_MODEL_NAME")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| causa_llm::gemini::DEFAULT_MODEL.to_string());

        let bind_address =
            lookup("CAUSA_BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0".to_string());
        let bind_port = parse_or(&lookup, "CAUSA_BIND_PORT", 8000)?;

        let defaults = PipelineConfig::default();
        let pipeline = PipelineConfig {
            fetch_timeout_secs: parse_or(
                &lookup,
                "CAUSA_FETCH_TIMEOUT_SECS",
                defaults.fetch_timeout_secs,
            )?,
            model_timeout_secs: parse_or(
                &lookup,
                "CAUSA_MODEL_TIMEOUT_SECS",
                defaults.model_timeout_secs,
            )?,
            max_document_bytes: parse_or(
                &lookup,
                "CAUSA_MAX_DOCUMENT_BYTES",
                defaults.max_document_bytes,
            )?,
            max_concurrent_extractions: parse_or(
                &lookup,
                "CAUSA_MAX_CONCURRENT_EXTRACTIONS",
                defaults.max_concurrent_extractions,
            )?,
        };

        Ok(Self {
            bind_address,
            bind_port,
            gemini_api_key,
            gemini_model,
            pipeline,
        })
    }

    /// Socket address string for binding
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::InvalidVar {
            name,
            detail: e.to_string(),
        }),
        None => Ok(default),
    }
}
