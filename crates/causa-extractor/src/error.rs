//! Error types for the extraction pipeline

use causa_llm::LlmError;
use thiserror::Error;

/// Errors that can occur while processing one extraction request.
///
/// Every variant is terminal for the request and is logged with full
/// context at its point of origin; nothing is retried. The only
/// non-error in the pipeline's failure taxonomy is transient-file
/// cleanup, which is logged as a warning inside `causa-llm` and never
/// surfaces here.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The inbound request is malformed (rejected before any work)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// URL unreachable, non-success status, wrong content type, or
    /// failed magic-byte check
    #[error("Document acquisition failed: {0}")]
    Acquisition(String),

    /// The model call itself failed (network, quota, service error)
    #[error("Model invocation failed: {0}")]
    ModelInvocation(String),

    /// The model responded but its output could not be used (no text
    /// in the envelope, or text that is not JSON)
    #[error("Model output unusable: {0}")]
    ModelOutput(String),

    /// The parsed model payload does not conform to the output schema
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Persisting the validated record failed
    #[error("Store error: {0}")]
    Store(String),

    /// The model call exceeded the configured deadline
    #[error("Model call timed out after {0}s")]
    Timeout(u64),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExtractionError {
    /// Stable machine-readable code for this failure class.
    ///
    /// The HTTP boundary maps these to distinct responses so callers
    /// can tell a bad URL from a model-parsing failure from a schema
    /// mismatch.
    pub fn code(&self) -> &'static str {
        match self {
            ExtractionError::InvalidRequest(_) => "invalid_request",
            ExtractionError::Acquisition(_) => "acquisition_failed",
            ExtractionError::ModelInvocation(_) => "model_invocation_failed",
            ExtractionError::ModelOutput(_) => "model_output_invalid",
            ExtractionError::Validation(_) => "validation_failed",
            ExtractionError::Store(_) => "store_failed",
            ExtractionError::Timeout(_) => "model_timeout",
            ExtractionError::Config(_) => "configuration_invalid",
        }
    }
}

impl From<LlmError> for ExtractionError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::BadPayload(_) | LlmError::EmptyResponse => {
                ExtractionError::ModelOutput(e.to_string())
            }
            other => ExtractionError::ModelInvocation(other.to_string()),
        }
    }
}
