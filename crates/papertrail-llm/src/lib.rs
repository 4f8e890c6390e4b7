//! Papertrail Completion Backends
//!
//! Pluggable implementations of the `CompletionBackend` trait from
//! `papertrail-domain`.
//!
//! # Backends
//!
//! - `MockBackend`: Deterministic mock for testing
//! - `OpenAiBackend`: OpenAI-compatible completions API over HTTP
//!
//! # Examples
//!
//! ```
//! use papertrail_llm::MockBackend;
//! use papertrail_domain::{CompletionBackend, CompletionRequest};
//!
//! let backend = MockBackend::new("Hello from the model!");
//! let request = CompletionRequest::new("test prompt", 100);
//! let completion = backend.complete(&request).unwrap();
//! assert_eq!(completion.text, "Hello from the model!");
//! ```

#![warn(missing_docs)]

pub mod openai;

use papertrail_domain::{Completion, CompletionBackend, CompletionRequest, FinishReason};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use openai::OpenAiBackend;

/// Errors that can occur during backend operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from the backend
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("Backend error: {0}")]
    Other(String),
}

/// Mock completion backend for deterministic testing
///
/// Returns pre-configured completions without making any network calls.
/// Responses can be keyed by prompt, forced to report truncation, or forced
/// to fail.
///
/// # Examples
///
/// ```
/// use papertrail_llm::MockBackend;
/// use papertrail_domain::{CompletionBackend, CompletionRequest, FinishReason};
///
/// let mut backend = MockBackend::new("default");
/// backend.add_response("prompt1", "response1");
/// backend.add_truncated_response("prompt2", "cut off mid-");
///
/// let c = backend.complete(&CompletionRequest::new("prompt1", 10)).unwrap();
/// assert_eq!(c.text, "response1");
///
/// let c = backend.complete(&CompletionRequest::new("prompt2", 10)).unwrap();
/// assert_eq!(c.finish_reason, FinishReason::Length);
/// ```
#[derive(Debug, Clone)]
pub struct MockBackend {
    default_completion: Completion,
    responses: Arc<Mutex<HashMap<String, ScriptedResponse>>>,
    call_count: Arc<Mutex<usize>>,
}

#[derive(Debug, Clone)]
enum ScriptedResponse {
    Ok(Completion),
    Err(String),
}

impl MockBackend {
    /// Create a mock that returns a fixed, untruncated completion.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            default_completion: Completion {
                text: text.into(),
                finish_reason: FinishReason::Stop,
            },
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Create a mock whose default completion reports truncation.
    pub fn truncated(text: impl Into<String>) -> Self {
        let mut backend = Self::new(text);
        backend.default_completion.finish_reason = FinishReason::Length;
        backend
    }

    /// Add a specific completion for a given prompt.
    pub fn add_response(&mut self, prompt: impl Into<String>, text: impl Into<String>) {
        self.responses.lock().unwrap().insert(
            prompt.into(),
            ScriptedResponse::Ok(Completion {
                text: text.into(),
                finish_reason: FinishReason::Stop,
            }),
        );
    }

    /// Add a completion that reports truncation for a given prompt.
    pub fn add_truncated_response(&mut self, prompt: impl Into<String>, text: impl Into<String>) {
        self.responses.lock().unwrap().insert(
            prompt.into(),
            ScriptedResponse::Ok(Completion {
                text: text.into(),
                finish_reason: FinishReason::Length,
            }),
        );
    }

    /// Configure the backend to fail for a specific prompt.
    pub fn add_error(&mut self, prompt: impl Into<String>, message: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(prompt.into(), ScriptedResponse::Err(message.into()));
    }

    /// Number of times `complete` was called.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call count.
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new("Default mock completion")
    }
}

impl CompletionBackend for MockBackend {
    type Error = LlmError;

    fn complete(&self, request: &CompletionRequest) -> Result<Completion, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        let responses = self.responses.lock().unwrap();
        if let Some(scripted) = responses.get(&request.prompt) {
            return match scripted {
                ScriptedResponse::Ok(completion) => Ok(completion.clone()),
                ScriptedResponse::Err(message) => Err(LlmError::Other(message.clone())),
            };
        }

        Ok(self.default_completion.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(prompt: &str) -> CompletionRequest {
        CompletionRequest::new(prompt, 100)
    }

    #[test]
    fn test_mock_backend_default() {
        let backend = MockBackend::new("Test response");
        let completion = backend.complete(&request("any prompt")).unwrap();
        assert_eq!(completion.text, "Test response");
        assert_eq!(completion.finish_reason, FinishReason::Stop);
    }

    #[test]
    fn test_mock_backend_specific_responses() {
        let mut backend = MockBackend::default();
        backend.add_response("hello", "world");
        backend.add_response("foo", "bar");

        assert_eq!(backend.complete(&request("hello")).unwrap().text, "world");
        assert_eq!(backend.complete(&request("foo")).unwrap().text, "bar");
        assert_eq!(
            backend.complete(&request("unknown")).unwrap().text,
            "Default mock completion"
        );
    }

    #[test]
    fn test_mock_backend_truncation() {
        let backend = MockBackend::truncated("partial out");
        let completion = backend.complete(&request("anything")).unwrap();
        assert!(completion.is_truncated());
        assert_eq!(completion.text, "partial out");
    }

    #[test]
    fn test_mock_backend_call_count() {
        let backend = MockBackend::new("test");

        assert_eq!(backend.call_count(), 0);

        backend.complete(&request("prompt1")).unwrap();
        assert_eq!(backend.call_count(), 1);

        backend.complete(&request("prompt2")).unwrap();
        assert_eq!(backend.call_count(), 2);

        backend.reset_call_count();
        assert_eq!(backend.call_count(), 0);
    }

    #[test]
    fn test_mock_backend_error() {
        let mut backend = MockBackend::default();
        backend.add_error("bad prompt", "scripted failure");

        let result = backend.complete(&request("bad prompt"));
        assert!(matches!(result, Err(LlmError::Other(_))));
    }

    #[test]
    fn test_mock_backend_clone_shares_count() {
        let backend1 = MockBackend::new("test");
        let backend2 = backend1.clone();

        backend1.complete(&request("test")).unwrap();

        // Both share the same call count due to Arc
        assert_eq!(backend1.call_count(), 1);
        assert_eq!(backend2.call_count(), 1);
    }
}
