//! Core pipeline orchestration

use crate::config::PipelineConfig;
use crate::error::ExtractionError;
use crate::fetcher::DocumentFetcher;
use crate::mapper;
use causa_domain::{CaseRecord, CaseStore, DocumentAnalyzer};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::time::timeout;
use tracing::{error, info};

/// One inbound extraction request
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ExtractionRequest {
    /// Absolute URL of the legal-process PDF
    pub pdf_url: String,

    /// Caller-supplied external case identifier (must be non-empty)
    pub case_id: String,
}

/// Sequences the pipeline: fetch, analyze, validate, persist.
///
/// Stages run linearly per request; any stage failure is terminal.
/// Concurrent requests share nothing except the semaphore capping
/// outbound model calls.
pub struct ProcessPipeline<A, S>
where
    A: DocumentAnalyzer,
    S: CaseStore,
{
    fetcher: DocumentFetcher,
    analyzer: Arc<A>,
    store: Arc<S>,
    config: PipelineConfig,
    model_permits: Arc<Semaphore>,
}

impl<A, S> ProcessPipeline<A, S>
where
    A: DocumentAnalyzer,
    S: CaseStore,
    ExtractionError: From<A::Error>,
{
    /// Create a pipeline over the given analyzer and store
    pub fn new(analyzer: A, store: S, config: PipelineConfig) -> Result<Self, ExtractionError> {
        config.validate().map_err(ExtractionError::Config)?;

        let fetcher = DocumentFetcher::new(&config);
        let model_permits = Arc::new(Semaphore::new(config.max_concurrent_extractions));

        Ok(Self {
            fetcher,
            analyzer: Arc::new(analyzer),
            store: Arc::new(store),
            config,
            model_permits,
        })
    }

    /// Access the underlying store (used by the HTTP layer's health
    /// reporting and by tests)
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Process one request to completion or first failure.
    ///
    /// `persisted_at` is stamped from this process's clock at the
    /// moment the validated record is assembled, never taken from the
    /// model.
    pub async fn process(&self, request: ExtractionRequest) -> Result<CaseRecord, ExtractionError> {
        if request.case_id.trim().is_empty() {
            return Err(ExtractionError::InvalidRequest(
                "case_id must be a non-empty string".to_string(),
            ));
        }

        info!(
            "Processing case '{}' from {}",
            request.case_id, request.pdf_url
        );

        let document = self
            .fetcher
            .fetch(&request.pdf_url)
            .await
            .inspect_err(|e| error!("Fetch stage failed for case '{}': {}", request.case_id, e))?;

        let raw = self
            .analyze(&document)
            .await
            .inspect_err(|e| error!("Model stage failed for case '{}': {}", request.case_id, e))?;

        let record = mapper::assemble(&request.case_id, &raw, Utc::now()).inspect_err(|e| {
            error!(
                "Validation stage failed for case '{}': {}",
                request.case_id, e
            )
        })?;

        self.store
            .save(&request.case_id, &record)
            .await
            .map_err(|e| ExtractionError::Store(e.to_string()))
            .inspect_err(|e| {
                error!("Persist stage failed for case '{}': {}", request.case_id, e)
            })?;

        info!(
            "Case '{}' extracted: {} timeline events, {} evidence items",
            record.case_id,
            record.timeline.len(),
            record.evidence.len()
        );

        Ok(record)
    }

    /// Run the model call under the concurrency cap and deadline
    async fn analyze(&self, document: &[u8]) -> Result<serde_json::Value, ExtractionError> {
        let _permit = self
            .model_permits
            .acquire()
            .await
            .map_err(|_| ExtractionError::ModelInvocation("model call limiter closed".to_string()))?;

        timeout(self.config.model_timeout(), self.analyzer.extract(document))
            .await
            .map_err(|_| ExtractionError::Timeout(self.config.model_timeout_secs))?
            .map_err(ExtractionError::from)
    }
}
