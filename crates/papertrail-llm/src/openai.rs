//! OpenAI-compatible completions backend
//!
//! Talks to a hosted completions endpoint (`/v1/completions` shape). Any
//! service speaking the same protocol works by pointing `endpoint` at it.
//!
//! # Features
//!
//! - Async HTTP communication under a blocking trait surface
//! - Configurable endpoint, model, and API key
//! - Retry logic with exponential backoff
//! - Timeout handling
//!
//! # Examples
//!
//! ```no_run
//! use papertrail_llm::OpenAiBackend;
//!
//! let backend = OpenAiBackend::new("https://api.openai.com", "sk-...", "text-davinci-003");
//! ```

use crate::LlmError;
use papertrail_domain::{Completion, CompletionBackend, CompletionRequest, FinishReason};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com";

/// Default model for completion calls
pub const DEFAULT_MODEL: &str = "text-davinci-003";

/// Default timeout for completion requests (120 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Hosted completions API backend
///
/// All requests are blocking from the caller's point of view; the async HTTP
/// client runs on a private runtime inside `complete`.
pub struct OpenAiBackend {
    endpoint: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
    max_retries: u32,
}

/// Request body for the completions API
#[derive(Serialize)]
struct ApiCompletionRequest {
    model: String,
    prompt: String,
    max_tokens: usize,
    temperature: f64,
    top_p: f64,
    frequency_penalty: f64,
    presence_penalty: f64,
}

/// Response body from the completions API
#[derive(Deserialize)]
struct ApiCompletionResponse {
    choices: Vec<ApiChoice>,
}

#[derive(Deserialize)]
struct ApiChoice {
    text: String,
    finish_reason: Option<String>,
}

impl OpenAiBackend {
    /// Create a new backend.
    ///
    /// # Parameters
    ///
    /// - `endpoint`: API base URL (e.g., "https://api.openai.com")
    /// - `api_key`: bearer token for the Authorization header
    /// - `model`: model to use (e.g., "text-davinci-003")
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: model.into(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Create a backend against the default endpoint and model, reading the
    /// API key from a file (trailing whitespace trimmed).
    pub fn from_key_file(path: impl AsRef<Path>) -> Result<Self, LlmError> {
        let key = fs::read_to_string(path.as_ref()).map_err(|e| {
            LlmError::Other(format!(
                "Failed to read API key from {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Ok(Self::new(DEFAULT_ENDPOINT, key.trim(), DEFAULT_MODEL))
    }

    /// Set the maximum number of retry attempts.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Run one completion against the API.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The endpoint is unreachable
    /// - The model is not available
    /// - The rate limit is exceeded after all retries
    /// - The response format is invalid
    pub async fn complete_async(
        &self,
        request: &CompletionRequest,
    ) -> Result<Completion, LlmError> {
        let url = format!("{}/v1/completions", self.endpoint);

        let body = ApiCompletionRequest {
            model: self.model.clone(),
            prompt: request.prompt.clone(),
            max_tokens: request.max_output_tokens,
            temperature: request.temperature,
            top_p: request.top_p,
            frequency_penalty: request.frequency_penalty,
            presence_penalty: request.presence_penalty,
        };

        // Retry logic with exponential backoff
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await
            {
                Ok(response) => {
                    if response.status().is_success() {
                        return match response.json::<ApiCompletionResponse>().await {
                            Ok(api_response) => {
                                let choice = api_response.choices.into_iter().next().ok_or_else(
                                    || {
                                        LlmError::InvalidResponse(
                                            "Response contained no choices".to_string(),
                                        )
                                    },
                                )?;
                                let finish_reason = choice
                                    .finish_reason
                                    .as_deref()
                                    .map(FinishReason::from_api)
                                    .unwrap_or(FinishReason::Stop);
                                Ok(Completion {
                                    text: choice.text,
                                    finish_reason,
                                })
                            }
                            Err(e) => Err(LlmError::InvalidResponse(format!(
                                "Failed to parse response: {}",
                                e
                            ))),
                        };
                    } else if response.status() == reqwest::StatusCode::NOT_FOUND {
                        return Err(LlmError::ModelNotAvailable(self.model.clone()));
                    } else if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        last_error = Some(LlmError::RateLimitExceeded);
                    } else {
                        let status = response.status();
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(LlmError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, etc.
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
    }
}

impl CompletionBackend for OpenAiBackend {
    type Error = LlmError;

    fn complete(&self, request: &CompletionRequest) -> Result<Completion, Self::Error> {
        // Blocking wrapper for the async client
        tokio::runtime::Runtime::new()
            .map_err(|e| LlmError::Other(format!("Failed to start runtime: {}", e)))?
            .block_on(self.complete_async(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_creation() {
        let backend = OpenAiBackend::new("https://api.openai.com", "sk-test", "text-davinci-003");
        assert_eq!(backend.endpoint, "https://api.openai.com");
        assert_eq!(backend.model, "text-davinci-003");
        assert_eq!(backend.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_backend_with_max_retries() {
        let backend = OpenAiBackend::new("https://api.openai.com", "sk-test", "text-davinci-003")
            .with_max_retries(5);
        assert_eq!(backend.max_retries, 5);
    }

    #[test]
    fn test_key_file_missing() {
        let result = OpenAiBackend::from_key_file("/nonexistent/openai_api_key.txt");
        assert!(matches!(result, Err(LlmError::Other(_))));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        // Unroutable port on localhost triggers a communication error
        let backend =
            OpenAiBackend::new("http://localhost:9", "sk-test", "text-davinci-003")
                .with_max_retries(1);

        let request = CompletionRequest::new("test", 10);
        let result = backend.complete_async(&request).await;

        match result {
            Err(LlmError::Communication(_)) => {}
            other => panic!("Expected Communication error, got {:?}", other.map(|c| c.text)),
        }
    }
}
