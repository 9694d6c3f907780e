//! Causa Extractor
//!
//! The document-acquisition-and-extraction pipeline: fetch an
//! untrusted remote PDF, hand it to a `DocumentAnalyzer`, validate
//! the model's raw payload into a typed `CaseRecord`, and persist it
//! through a `CaseStore`.
//!
//! # Architecture
//!
//! ```text
//! URL → DocumentFetcher → PDF bytes → DocumentAnalyzer → raw JSON
//!     → mapper::assemble → CaseRecord → CaseStore → caller
//! ```
//!
//! Stages run linearly with no retries; the first failure wraps into
//! one [`ExtractionError`] variant identifying which stage failed.
//!
//! # Example Usage
//!
//! ```no_run
//! use causa_extractor::{ProcessPipeline, PipelineConfig, ExtractionRequest};
//! use causa_llm::MockAnalyzer;
//! use causa_store::MemoryStore;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let analyzer = MockAnalyzer::new(json!({
//!     "resume": "Ação de cobrança.",
//!     "timeline": [],
//!     "evidence": []
//! }));
//! let store = MemoryStore::new();
//! let pipeline = ProcessPipeline::new(analyzer, store, PipelineConfig::default())?;
//!
//! let record = pipeline
//!     .process(ExtractionRequest {
//!         pdf_url: "https://example.com/sample.pdf".to_string(),
//!         case_id: "0809090-86.2024.8.12.0021".to_string(),
//!     })
//!     .await?;
//!
//! println!("{} timeline events", record.timeline.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod fetcher;
pub mod mapper;
mod pipeline;

#[cfg(test)]
mod tests;

pub use config::PipelineConfig;
pub use error::ExtractionError;
pub use fetcher::{DocumentFetcher, PDF_MAGIC};
pub use pipeline::{ExtractionRequest, ProcessPipeline};
