//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and
//! infrastructure. Implementations live in other crates.

use crate::CaseRecord;
use async_trait::async_trait;

/// Trait for extracting structured case data from a document
///
/// Implemented by the infrastructure layer (`causa-llm`). The payload
/// returned is the model's raw, untrusted JSON — callers must pass it
/// through schema validation before treating it as a domain object.
#[async_trait]
pub trait DocumentAnalyzer: Send + Sync {
    /// Error type for analyzer operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Extract structured data from a PDF byte payload.
    ///
    /// Returns a JSON object expected to carry `resume`, `timeline`
    /// and `evidence` keys, with no guarantee that it actually does.
    async fn extract(&self, document: &[u8]) -> Result<serde_json::Value, Self::Error>;
}

/// Trait for persisting extracted case records
///
/// Implemented by the infrastructure layer (`causa-store`).
/// Semantics are upsert: saving twice under the same `case_id`
/// replaces the earlier record.
#[async_trait]
pub trait CaseStore: Send + Sync {
    /// Error type for store operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Save a record under its case id, replacing any previous one
    async fn save(&self, case_id: &str, record: &CaseRecord) -> Result<(), Self::Error>;
}
