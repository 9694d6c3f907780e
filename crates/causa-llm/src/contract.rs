//! The extraction contract - the fixed instruction text sent to the
//! model on every call
//!
//! This is a pure text artifact with no state or side effects.
//! Changing it is the only supported way to alter what is extracted.

/// System instruction describing the required output shape.
///
/// The contract pins down the three top-level keys, the exact keys
/// and types of every nested item, and the sentinel convention
/// (`null` for unknown strings, `-1` for unknown integers - keys are
/// never omitted).
pub const EXTRACTION_CONTRACT: &str = r#"You are a specialized legal assistant AI. Your task is to analyze the provided legal process document PDF and extract the relevant and key information into a structured JSON format.

The response must be a single valid JSON object without any additional text or explanation. Do not include markdown formatting like ```json.

The JSON object must have three top-level keys: "resume", "timeline", and "evidence".

1. "resume": Provide a concise text summary of the legal case.
2. "timeline": Create a list of all relevant events in chronological order. Each event must be an object with these exact keys:
   - "event_id": integer, starting from 0.
   - "event_name": string, a short title for the event (e.g., "Ajuizamento da Ação", "Decisão Interlocutória").
   - "event_description": string, a detailed description of the event.
   - "event_date": string, in "YYYY-MM-DD" format.
   - "event_page_init": integer, the starting page number of the event.
   - "event_page_end": integer, the ending page number of the event.
3. "evidence": Create a list of all attached evidence/proofs. Each item must be an object with these exact keys:
   - "evidence_id": integer, starting from 0.
   - "evidence_name": string, the name of the document (e.g., "Fatura CredNet", "Procuração").
   - "evidence_flaw": string, describe any inconsistencies or "Sem inconsistências" if none.
   - "evidence_page_init": integer, the starting page number.
   - "evidence_page_end": integer, the ending page number.

Ensure the JSON structure is strictly followed, with correct key names and data types. If certain information is not available, use null for strings and -1 for integers - never omit a key.

Analyze the entire document carefully to ensure all events and evidence are captured accurately. The goal is to provide a clear, structured overview of the legal case based on the document content."#;

/// Short trailing instruction sent after the document reference.
pub const CLOSING_INSTRUCTION: &str =
    "Extract the data from the legal process document into the required JSON format now.";
