//! Case entities - the structured output of a document extraction
//!
//! Field names are wire-significant: they match the JSON contract the
//! model is instructed to produce and the shape returned to callers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Integer sentinel the model uses for "unknown" where a number is
/// required. A `-1` id or page number is valid, semantically empty data.
pub const UNKNOWN_INT: i64 = -1;

/// One dated occurrence in the case history.
///
/// Ids start at 0 and are assigned by the model in document order;
/// they are never recomputed here. Page numbers are 1-based, with
/// [`UNKNOWN_INT`] standing in when the model could not locate them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Unique identifier for the event within one record
    pub event_id: i64,

    /// Short label for the event
    pub event_name: String,

    /// Detailed free-text description
    pub event_description: String,

    /// Calendar date of the event (`YYYY-MM-DD`)
    pub event_date: NaiveDate,

    /// Starting page of the event in the source document
    pub event_page_init: i64,

    /// Ending page of the event in the source document
    pub event_page_end: i64,
}

/// One document or exhibit attached to the case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    /// Unique identifier for the evidence item within one record
    pub evidence_id: i64,

    /// Name of the evidence document
    pub evidence_name: String,

    /// Identified inconsistency, if any.
    ///
    /// `None` means "flaw unknown"; the literal string
    /// `"Sem inconsistências"` means "examined, no flaw found". The
    /// two are distinct states and are both preserved verbatim.
    pub evidence_flaw: Option<String>,

    /// Starting page of the evidence in the source document
    pub evidence_page_init: i64,

    /// Ending page of the evidence in the source document
    pub evidence_page_end: i64,
}

/// The full structured record for one legal case.
///
/// Constructed fresh per request and never mutated afterwards.
/// `case_id` comes from the caller and `persisted_at` from the
/// orchestrator's clock — neither is ever sourced from the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    /// Caller-supplied external case identifier (opaque, non-empty)
    pub case_id: String,

    /// Free-text summary of the case
    pub resume: String,

    /// Events in the order the model produced them (chronological by
    /// convention, not enforced)
    pub timeline: Vec<TimelineEvent>,

    /// Evidence items, unordered
    pub evidence: Vec<Evidence>,

    /// UTC timestamp assigned at the moment of successful extraction
    pub persisted_at: DateTime<Utc>,
}

impl Evidence {
    /// Whether the model examined this item and found nothing wrong,
    /// as opposed to not knowing (`evidence_flaw == None`).
    pub fn has_flaw(&self) -> bool {
        match &self.evidence_flaw {
            None => false,
            Some(flaw) => flaw != "Sem inconsistências",
        }
    }
}
