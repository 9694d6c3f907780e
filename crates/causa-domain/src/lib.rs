//! Causa Domain Layer
//!
//! Core entities and port traits for the legal-process extraction
//! service. This crate holds the business shapes only — every
//! network-facing or storage-facing concern lives behind a trait
//! implemented in an infrastructure crate.
//!
//! ## Key Concepts
//!
//! - **CaseRecord**: the full structured result for one legal case
//! - **TimelineEvent / Evidence**: the nested items the model extracts
//! - **DocumentAnalyzer**: port for "bytes in, structured JSON out"
//! - **CaseStore**: port for upsert-by-`case_id` persistence
//!
//! ## Architecture
//!
//! Infrastructure implementations (Gemini client, storage backends)
//! live in `causa-llm` and `causa-store`; the pipeline in
//! `causa-extractor` depends only on the traits defined here.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entities;
pub mod traits;

pub use entities::{CaseRecord, Evidence, TimelineEvent};
pub use traits::{CaseStore, DocumentAnalyzer};
