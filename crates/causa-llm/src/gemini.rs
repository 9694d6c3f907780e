//! Gemini Analyzer Implementation
//!
//! Talks to a Gemini-style generative API that requires documents to
//! be registered through a file-upload endpoint before they can be
//! referenced in a generation request.
//!
//! # Call shape
//!
//! 1. Spool the PDF bytes to a transient local file (the upload API
//!    wants a file-addressable resource, not inline bytes)
//! 2. Upload the file, keeping the returned file URI
//! 3. One `generateContent` request: contract text + file reference +
//!    closing instruction, JSON response mode
//! 4. Unwrap the text payload and parse it as JSON
//!
//! The transient file is removed on every exit path, including error
//! returns; a removal failure is logged as a warning and never fails
//! the call. There are no retries - one attempt per call.

use crate::contract::{CLOSING_INSTRUCTION, EXTRACTION_CONTRACT};
use crate::LlmError;
use async_trait::async_trait;
use causa_domain::DocumentAnalyzer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Default Gemini API endpoint
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model identifier
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Default timeout for a single backend call (upload or generate)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Gemini-backed implementation of `DocumentAnalyzer`
pub struct GeminiAnalyzer {
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

/// A uniquely named local file holding the document for the duration
/// of one extraction call.
///
/// The filename embeds a UUIDv7 so concurrent requests never clobber
/// each other's document. Dropping the guard removes the file.
struct TransientDocument {
    path: PathBuf,
}

impl TransientDocument {
    async fn write(bytes: &[u8]) -> Result<Self, LlmError> {
        let path = std::env::temp_dir().join(format!("causa-doc-{}.pdf", uuid::Uuid::now_v7()));
        tokio::fs::write(&path, bytes).await?;
        debug!("Spooled {} bytes to {}", bytes.len(), path.display());
        Ok(Self { path })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TransientDocument {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed transient document {}", self.path.display()),
            Err(e) => warn!(
                "Failed to remove transient document {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    File {
        #[serde(rename = "fileData")]
        file_data: FileData,
    },
}

#[derive(Serialize)]
struct FileData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    #[serde(rename = "fileUri")]
    file_uri: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    file: UploadedFile,
}

#[derive(Deserialize)]
struct UploadedFile {
    uri: String,
}

impl GeminiAnalyzer {
    /// Create a new analyzer against the public Gemini endpoint
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap();

        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Override the API base URL (used to point tests at a stub)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn run_extraction(&self, path: &Path) -> Result<Value, LlmError> {
        let file_uri = self.upload_document(path).await?;
        let envelope = self.generate(&file_uri).await?;

        let text = extract_text(&envelope).ok_or(LlmError::EmptyResponse)?;

        match serde_json::from_str::<Value>(&text) {
            Ok(payload) => Ok(payload),
            Err(e) => {
                error!("Model output is not valid JSON: {}", e);
                error!("Offending model output: {}", text);
                Err(LlmError::BadPayload(e.to_string()))
            }
        }
    }

    /// Register the spooled document with the file-upload endpoint
    async fn upload_document(&self, path: &Path) -> Result<String, LlmError> {
        let url = format!("{}/upload/v1beta/files?key={}", self.base_url, self.api_key);
        let bytes = tokio::fs::read(path).await?;

        let response = self
            .client
            .post(&url)
            .header("X-Goog-Upload-Protocol", "raw")
            .header(reqwest::header::CONTENT_TYPE, "application/pdf")
            .body(bytes)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Upload request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::ServiceStatus { status, detail });
        }

        let upload: UploadResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Communication(format!("Malformed upload response: {}", e)))?;

        debug!("Uploaded document as {}", upload.file.uri);
        Ok(upload.file.uri)
    }

    /// Submit the single generation request for an uploaded document
    async fn generate(&self, file_uri: &str) -> Result<Value, LlmError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: EXTRACTION_CONTRACT.to_string(),
                    },
                    Part::File {
                        file_data: FileData {
                            mime_type: "application/pdf".to_string(),
                            file_uri: file_uri.to_string(),
                        },
                    },
                    Part::Text {
                        text: CLOSING_INSTRUCTION.to_string(),
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Generation request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::ServiceStatus { status, detail });
        }

        response
            .json()
            .await
            .map_err(|e| LlmError::Communication(format!("Malformed response envelope: {}", e)))
    }
}

#[async_trait]
impl DocumentAnalyzer for GeminiAnalyzer {
    type Error = LlmError;

    async fn extract(&self, document: &[u8]) -> Result<Value, Self::Error> {
        info!(
            "Extracting case data via model '{}' ({} byte document)",
            self.model,
            document.len()
        );

        let transient = TransientDocument::write(document).await?;
        // The guard drops here on success and on every error return,
        // so the spooled file is removed exactly once per call.
        self.run_extraction(transient.path()).await
    }
}

/// Pull the textual payload out of the response envelope.
///
/// The primary location is `candidates[0].content.parts[0].text`;
/// when that is absent or empty, fall back to scanning the envelope
/// for the first non-empty `text` field anywhere in it.
fn extract_text(envelope: &Value) -> Option<String> {
    let primary = envelope
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.get(0))
        .and_then(|p| p.get("text"))
        .and_then(|t| t.as_str());

    match primary {
        Some(text) if !text.is_empty() => Some(text.to_string()),
        _ => find_text_field(envelope),
    }
}

fn find_text_field(value: &Value) -> Option<String> {
    match value {
        Value::Object(map) => {
            if let Some(text) = map.get("text").and_then(|t| t.as_str()) {
                if !text.is_empty() {
                    return Some(text.to_string());
                }
            }
            map.values().find_map(find_text_field)
        }
        Value::Array(items) => items.iter().find_map(find_text_field),
        _ => None,
    }
}
