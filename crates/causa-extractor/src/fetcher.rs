//! Download and validate an untrusted remote PDF
//!
//! Nothing reaches the model adapter without passing both the
//! declared-type check and the magic-byte check. A server returning
//! an HTML error page with a 200 status is rejected here.

use crate::config::PipelineConfig;
use crate::error::ExtractionError;
use std::time::Duration;
use tracing::{info, warn};

/// Leading byte sequence identifying a PDF file
pub const PDF_MAGIC: &[u8] = b"%PDF-";

/// Downloads a document from a caller-supplied URL
pub struct DocumentFetcher {
    client: reqwest::Client,
    max_document_bytes: usize,
}

impl DocumentFetcher {
    /// Create a fetcher with the pipeline's timeout and size limits
    pub fn new(config: &PipelineConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.fetch_timeout())
            .build()
            .unwrap();

        Self {
            client,
            max_document_bytes: config.max_document_bytes,
        }
    }

    /// Create a fetcher with explicit limits
    pub fn with_limits(timeout: Duration, max_document_bytes: usize) -> Self {
        let client = reqwest::Client::builder().timeout(timeout).build().unwrap();
        Self {
            client,
            max_document_bytes,
        }
    }

    /// Download the document and return its exact bytes.
    ///
    /// Single attempt, no retry. Fails unless the HTTP status is a
    /// success, the `Content-Type` header contains `application/pdf`,
    /// and the body starts with [`PDF_MAGIC`].
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, ExtractionError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|e| ExtractionError::Acquisition(format!("Invalid URL '{}': {}", url, e)))?;

        // The suffix is only a naming hint, never authoritative
        if !parsed.path().to_ascii_lowercase().ends_with(".pdf") {
            warn!("URL path '{}' does not end in .pdf", parsed.path());
        }

        info!("Downloading document from {}", url);

        let response = self.client.get(parsed).send().await.map_err(|e| {
            ExtractionError::Acquisition(format!("Request to '{}' failed: {}", url, e))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractionError::Acquisition(format!(
                "Document host returned HTTP {}",
                status
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();
        if !content_type.contains("application/pdf") {
            return Err(ExtractionError::Acquisition(format!(
                "Expected content type 'application/pdf' but got '{}'",
                content_type
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ExtractionError::Acquisition(format!("Failed to read body: {}", e)))?;

        if body.len() > self.max_document_bytes {
            return Err(ExtractionError::Acquisition(format!(
                "Document of {} bytes exceeds the {} byte limit",
                body.len(),
                self.max_document_bytes
            )));
        }

        if !body.starts_with(PDF_MAGIC) {
            return Err(ExtractionError::Acquisition(
                "Downloaded file is missing the %PDF- signature".to_string(),
            ));
        }

        info!("Downloaded and validated {} byte PDF", body.len());
        Ok(body.to_vec())
    }
}
