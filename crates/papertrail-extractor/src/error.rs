//! Error types for the extraction pipeline

use thiserror::Error;

/// Errors that can occur while processing one document
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Completion backend error
    #[error("Backend error: {0}")]
    Backend(String),

    /// Summarization stopped making progress before the text fit the budget
    #[error("Budget unreachable: {length} chars after {iterations} reduction passes")]
    BudgetUnreachable {
        /// Reduction passes performed before giving up
        iterations: usize,
        /// Text length when progress stopped
        length: usize,
    },

    /// No JSON object could be located in the model output
    #[error("No JSON object found in model output")]
    NoJsonObject,

    /// A candidate JSON span was located but failed to decode
    #[error("Malformed JSON object: {0}")]
    MalformedJson(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExtractError {
    /// Parse failures degrade to raw text; everything else fails the document.
    pub fn is_parse_failure(&self) -> bool {
        matches!(
            self,
            ExtractError::NoJsonObject | ExtractError::MalformedJson(_)
        )
    }
}
