//! Causa LLM Provider Layer
//!
//! Pluggable implementations of the `DocumentAnalyzer` trait from
//! `causa-domain`.
//!
//! # Providers
//!
//! - `MockAnalyzer`: deterministic mock for testing, no network calls
//! - `GeminiAnalyzer`: Gemini file-upload + generate-content API
//!
//! # Examples
//!
//! ```
//! use causa_llm::MockAnalyzer;
//! use causa_domain::DocumentAnalyzer;
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let analyzer = MockAnalyzer::new(json!({"resume": "ok"}));
//! let result = analyzer.extract(b"%PDF-1.7").await.unwrap();
//! assert_eq!(result["resume"], "ok");
//! # });
//! ```

#![warn(missing_docs)]

pub mod contract;
pub mod gemini;

use async_trait::async_trait;
use causa_domain::DocumentAnalyzer;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use gemini::GeminiAnalyzer;

/// Errors that can occur while talking to a model backend
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// The backend answered with a non-success HTTP status
    #[error("Model service returned {status}: {detail}")]
    ServiceStatus {
        /// HTTP status code returned by the backend
        status: u16,
        /// Response body or status text
        detail: String,
    },

    /// The response envelope carried no usable text
    #[error("No text content in model response")]
    EmptyResponse,

    /// The model's text output could not be parsed as JSON.
    /// The offending raw text is logged at the point of origin,
    /// never carried in the error value.
    #[error("Model output is not valid JSON: {0}")]
    BadPayload(String),

    /// Transient file handling failed
    #[error("Transient document I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure mode a [`MockAnalyzer`] can be configured to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    /// Simulate a backend communication failure
    Invocation,
    /// Simulate unparseable model output
    BadPayload,
}

/// Mock analyzer for deterministic testing
///
/// Returns a pre-configured JSON payload (or error) without making
/// any network calls and without touching the filesystem.
///
/// # Examples
///
/// ```
/// use causa_llm::{MockAnalyzer, MockFailure};
/// use causa_domain::DocumentAnalyzer;
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let analyzer = MockAnalyzer::new(json!({"resume": "r", "timeline": [], "evidence": []}));
/// assert!(analyzer.extract(b"%PDF-").await.is_ok());
/// assert_eq!(analyzer.call_count(), 1);
///
/// let failing = MockAnalyzer::failing(MockFailure::BadPayload);
/// assert!(failing.extract(b"%PDF-").await.is_err());
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct MockAnalyzer {
    response: serde_json::Value,
    failure: Option<MockFailure>,
    call_count: Arc<Mutex<usize>>,
}

impl MockAnalyzer {
    /// Create a mock that returns the given payload for every call
    pub fn new(response: serde_json::Value) -> Self {
        Self {
            response,
            failure: None,
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Create a mock that fails every call with the given mode
    pub fn failing(mode: MockFailure) -> Self {
        Self {
            response: serde_json::Value::Null,
            failure: Some(mode),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Number of times `extract` was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl DocumentAnalyzer for MockAnalyzer {
    type Error = LlmError;

    async fn extract(&self, _document: &[u8]) -> Result<serde_json::Value, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        match self.failure {
            Some(MockFailure::Invocation) => Err(LlmError::Communication(
                "mock backend unavailable".to_string(),
            )),
            Some(MockFailure::BadPayload) => Err(LlmError::BadPayload(
                "expected value at line 1 column 1".to_string(),
            )),
            None => Ok(self.response.clone()),
        }
    }
}
