//! Validate the model's raw payload into a typed `CaseRecord`
//!
//! The payload is an untrusted external dictionary: every field is
//! checked for presence and type before it becomes a domain object.
//! Missing required keys and wrong types are terminal; extra keys are
//! ignored. `-1` is accepted for every integer field and `null` for
//! `evidence_flaw`, per the sentinel convention in the extraction
//! contract. Whatever the model claims about `case_id` or
//! `persisted_at` is discarded - the caller's id and the
//! orchestrator's clock always win.

use crate::error::ExtractionError;
use causa_domain::{CaseRecord, Evidence, TimelineEvent};
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Map, Value};
use tracing::warn;

/// Merge the caller-supplied `case_id` and timestamp with the model's
/// payload, validating field by field against the output schema.
pub fn assemble(
    case_id: &str,
    raw: &Value,
    now: DateTime<Utc>,
) -> Result<CaseRecord, ExtractionError> {
    let obj = raw
        .as_object()
        .ok_or_else(|| ExtractionError::Validation("Model payload is not a JSON object".to_string()))?;

    let resume = require_str(obj, "resume").map_err(ExtractionError::Validation)?;
    let timeline_raw = require_array(obj, "timeline").map_err(ExtractionError::Validation)?;
    let evidence_raw = require_array(obj, "evidence").map_err(ExtractionError::Validation)?;

    let timeline = timeline_raw
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            parse_timeline_event(item)
                .map_err(|e| ExtractionError::Validation(format!("timeline[{}]: {}", idx, e)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let evidence = evidence_raw
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            parse_evidence(item)
                .map_err(|e| ExtractionError::Validation(format!("evidence[{}]: {}", idx, e)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    // Chronological order is the model's promise, not ours to repair
    if timeline.windows(2).any(|w| w[0].event_date > w[1].event_date) {
        warn!(
            "Timeline for case '{}' is not in chronological order; preserving model order",
            case_id
        );
    }

    Ok(CaseRecord {
        case_id: case_id.to_string(),
        resume,
        timeline,
        evidence,
        persisted_at: now,
    })
}

fn parse_timeline_event(json: &Value) -> Result<TimelineEvent, String> {
    let obj = json
        .as_object()
        .ok_or_else(|| "event is not a JSON object".to_string())?;

    let event = TimelineEvent {
        event_id: require_int(obj, "event_id")?,
        event_name: require_str(obj, "event_name")?,
        event_description: require_str(obj, "event_description")?,
        event_date: require_date(obj, "event_date")?,
        event_page_init: require_int(obj, "event_page_init")?,
        event_page_end: require_int(obj, "event_page_end")?,
    };

    check_page_range(event.event_page_init, event.event_page_end)?;
    Ok(event)
}

fn parse_evidence(json: &Value) -> Result<Evidence, String> {
    let obj = json
        .as_object()
        .ok_or_else(|| "evidence item is not a JSON object".to_string())?;

    let evidence = Evidence {
        evidence_id: require_int(obj, "evidence_id")?,
        evidence_name: require_str(obj, "evidence_name")?,
        evidence_flaw: optional_str(obj, "evidence_flaw")?,
        evidence_page_init: require_int(obj, "evidence_page_init")?,
        evidence_page_end: require_int(obj, "evidence_page_end")?,
    };

    check_page_range(evidence.evidence_page_init, evidence.evidence_page_end)?;
    Ok(evidence)
}

fn require_str(obj: &Map<String, Value>, key: &str) -> Result<String, String> {
    obj.get(key)
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| format!("missing or non-string '{}'", key))
}

/// `null` and a string are both legal; a missing key or any other
/// type is not.
fn optional_str(obj: &Map<String, Value>, key: &str) -> Result<Option<String>, String> {
    match obj.get(key) {
        Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(format!("'{}' must be a string or null", key)),
        None => Err(format!("missing '{}'", key)),
    }
}

fn require_array<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<&'a Vec<Value>, String> {
    obj.get(key)
        .and_then(|v| v.as_array())
        .ok_or_else(|| format!("missing or non-array '{}'", key))
}

fn require_int(obj: &Map<String, Value>, key: &str) -> Result<i64, String> {
    obj.get(key)
        .and_then(|v| v.as_i64())
        .ok_or_else(|| format!("missing or non-integer '{}'", key))
}

fn require_date(obj: &Map<String, Value>, key: &str) -> Result<NaiveDate, String> {
    let text = require_str(obj, key)?;
    NaiveDate::parse_from_str(&text, "%Y-%m-%d")
        .map_err(|_| format!("'{}' is not a YYYY-MM-DD date: '{}'", key, text))
}

/// `init <= end` holds only between real page numbers; any pair
/// involving the `-1` sentinel passes.
fn check_page_range(init: i64, end: i64) -> Result<(), String> {
    if init >= 1 && end >= 1 && init > end {
        return Err(format!("page range {}..{} is inverted", init, end));
    }
    Ok(())
}
