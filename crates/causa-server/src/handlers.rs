//! HTTP request handlers for the extraction service.
//!
//! One inbound operation: `POST /extract` with
//! `{ "pdf_url": ..., "case_id": ... }`, answered with the full
//! `CaseRecord` JSON or a structured error carrying the taxonomy code
//! of the failing stage. Plus `GET /health`.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use causa_domain::{CaseRecord, CaseStore, DocumentAnalyzer};
use causa_extractor::{ExtractionError, ExtractionRequest, ProcessPipeline};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared application state
pub struct AppState<A, S>
where
    A: DocumentAnalyzer,
    S: CaseStore,
{
    /// The extraction pipeline every request runs through
    pub pipeline: Arc<ProcessPipeline<A, S>>,
}

// Manual impl: cloning the state must not require A: Clone
impl<A, S> Clone for AppState<A, S>
where
    A: DocumentAnalyzer,
    S: CaseStore,
{
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall service status
    pub status: String,
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Stable failure-class code (see `ExtractionError::code`)
    pub code: String,
}

/// Application error wrapper mapping taxonomy entries to HTTP statuses
#[derive(Debug)]
pub struct AppError(pub ExtractionError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Client faults are 422; anything that went wrong behind a
        // successful request (including the model producing data that
        // fails schema validation) is a backend fault.
        let status = match &self.0 {
            ExtractionError::InvalidRequest(_) | ExtractionError::Acquisition(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ExtractionError::ModelInvocation(_)
            | ExtractionError::ModelOutput(_)
            | ExtractionError::Validation(_)
            | ExtractionError::Timeout(_) => StatusCode::BAD_GATEWAY,
            ExtractionError::Store(_) | ExtractionError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ErrorResponse {
            error: self.0.to_string(),
            code: self.0.code().to_string(),
        });
        (status, body).into_response()
    }
}

impl From<ExtractionError> for AppError {
    fn from(e: ExtractionError) -> Self {
        AppError(e)
    }
}

/// POST /extract - run the full pipeline for one document
async fn extract_case<A, S>(
    State(state): State<AppState<A, S>>,
    Json(request): Json<ExtractionRequest>,
) -> Result<Json<CaseRecord>, AppError>
where
    A: DocumentAnalyzer + 'static,
    S: CaseStore + 'static,
    ExtractionError: From<A::Error>,
{
    let record = state.pipeline.process(request).await?;
    Ok(Json(record))
}

/// GET /health - liveness check
async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
    })
}

/// Create the axum router with all routes
pub fn create_router<A, S>(state: AppState<A, S>) -> Router
where
    A: DocumentAnalyzer + 'static,
    S: CaseStore + 'static,
    ExtractionError: From<A::Error>,
{
    Router::new()
        .route("/extract", post(extract_case::<A, S>))
        .route("/health", get(health_check))
        .with_state(state)
}
