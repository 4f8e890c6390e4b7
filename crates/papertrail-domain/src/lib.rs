//! Papertrail Domain Layer
//!
//! This crate contains the core data model for papertrail: the budget
//! arithmetic that bounds every model call, the field specification that
//! drives extraction, the per-document outcome types, and the trait
//! interfaces that all other layers depend upon.
//!
//! ## Key Concepts
//!
//! - **Budget**: the fixed input+output size a single completion may use
//! - **FieldSpec**: the ordered set of fields to extract from each document
//! - **ExtractionRecord**: normalized field values plus a confidence score
//! - **DocumentOutcome**: structured, degraded-to-raw-text, or failed
//!
//! ## Architecture
//!
//! - Pure data and trait definitions, no I/O
//! - Infrastructure implementations live in other crates
//! - Trait definitions for the completion backend and text source seams

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod budget;
pub mod completion;
pub mod fields;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use budget::Budget;
pub use completion::{Completion, CompletionRequest, FinishReason};
pub use fields::FieldSpec;
pub use record::{DocumentOutcome, ExtractionRecord};
pub use traits::{CompletionBackend, TextSource};
