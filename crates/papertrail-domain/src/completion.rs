//! Request and response types for the completion backend seam

use serde::{Deserialize, Serialize};

/// Why the model stopped generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// The model finished on its own
    Stop,
    /// The output hit its token ceiling; the text may be cut off
    Length,
    /// Any other backend-reported reason
    Other(String),
}

impl FinishReason {
    /// Parse a backend-reported finish reason string.
    pub fn from_api(reason: &str) -> Self {
        match reason {
            "stop" => FinishReason::Stop,
            "length" => FinishReason::Length,
            other => FinishReason::Other(other.to_string()),
        }
    }

    /// Was the output truncated by the token ceiling?
    pub fn is_truncated(&self) -> bool {
        matches!(self, FinishReason::Length)
    }
}

/// A single stateless completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// The full prompt text
    pub prompt: String,

    /// Maximum tokens the model may generate
    pub max_output_tokens: usize,

    /// Sampling temperature
    pub temperature: f64,

    /// Nucleus sampling parameter
    pub top_p: f64,

    /// Frequency penalty
    pub frequency_penalty: f64,

    /// Presence penalty
    pub presence_penalty: f64,
}

impl CompletionRequest {
    /// Create a request with the default sampling parameters.
    pub fn new(prompt: impl Into<String>, max_output_tokens: usize) -> Self {
        Self {
            prompt: prompt.into(),
            max_output_tokens,
            temperature: 0.7,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        }
    }
}

/// The backend's answer to a [`CompletionRequest`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Completion {
    /// Generated text
    pub text: String,

    /// Why generation stopped
    pub finish_reason: FinishReason,
}

impl Completion {
    /// Was the output truncated by the token ceiling?
    pub fn is_truncated(&self) -> bool {
        self.finish_reason.is_truncated()
    }
}
