//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline and its two
//! collaborators: the completion backend and the text source.
//! Infrastructure implementations live in other crates.

use crate::completion::{Completion, CompletionRequest};
use std::path::Path;

/// A single stateless completion call.
///
/// Implemented by the infrastructure layer (papertrail-llm). All calls are
/// blocking request/response; the pipeline never overlaps them.
pub trait CompletionBackend {
    /// Error type for backend operations
    type Error;

    /// Run one completion and report how generation stopped.
    ///
    /// A `FinishReason::Length` in the result means the output hit its token
    /// ceiling; callers must treat that as a warning, not an error.
    fn complete(&self, request: &CompletionRequest) -> Result<Completion, Self::Error>;
}

/// Supplies raw extracted text for one document.
///
/// May be native PDF text extraction, OCR, or a plain file read; the pipeline
/// does not care which. A failure here skips the document.
pub trait TextSource {
    /// Error type for acquisition operations
    type Error;

    /// Produce the raw text for the document at `path`.
    fn get_text(&self, path: &Path) -> Result<String, Self::Error>;
}
