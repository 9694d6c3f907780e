//! Causa Server
//!
//! HTTP boundary for the legal-process extraction service. Wires the
//! Gemini analyzer and the case store into a `ProcessPipeline` and
//! exposes it at `POST /extract`.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use causa_extractor::ProcessPipeline;
use causa_llm::GeminiAnalyzer;
use causa_store::MemoryStore;
use config::ServerConfig;
use handlers::{create_router, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Pipeline construction error
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] causa_extractor::ExtractionError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Start the extraction HTTP server.
///
/// Builds the concrete adapters from config, assembles the pipeline,
/// and serves until the process is stopped.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    info!("Starting Causa extraction server");
    info!("Bind address: {}", config.bind_addr());
    info!("Model: {}", config.gemini_model);
    info!(
        "Model concurrency cap: {}",
        config.pipeline.max_concurrent_extractions
    );

    let analyzer = GeminiAnalyzer::new(config.gemini_api_key.clone(), config.gemini_model.clone());
    let store = MemoryStore::new();
    let pipeline = ProcessPipeline::new(analyzer, store, config.pipeline.clone())?;

    let state = AppState {
        pipeline: Arc::new(pipeline),
    };

    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
