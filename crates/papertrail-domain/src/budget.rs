//! Context-budget arithmetic for completion calls

use serde::{Deserialize, Serialize};

/// Default total context size, matching a 4k-context completion model.
pub const DEFAULT_MAX_TOTAL_TOKENS: usize = 4097;

/// Default tokens reserved for the final extraction output.
pub const DEFAULT_COMPLETION_RESERVE_TOKENS: usize = 100;

/// Default tokens reserved for each summarization output.
pub const DEFAULT_SUMMARY_RESERVE_TOKENS: usize = 256;

/// The fixed input+output budget a single completion call may use.
///
/// Lengths are measured in characters as a rough proxy for tokens; the
/// reserves are deliberately generous so the proxy errs on the safe side.
/// The invariant enforced before any extraction call is:
///
/// ```text
/// input_length + completion_reserve_tokens <= max_total_tokens
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Total model context (input + output)
    pub max_total_tokens: usize,

    /// Tokens reserved for the extraction call's output
    pub completion_reserve_tokens: usize,

    /// Tokens reserved for each summarization call's output
    pub summary_reserve_tokens: usize,
}

impl Budget {
    /// Create a budget with explicit limits.
    pub fn new(
        max_total_tokens: usize,
        completion_reserve_tokens: usize,
        summary_reserve_tokens: usize,
    ) -> Self {
        Self {
            max_total_tokens,
            completion_reserve_tokens,
            summary_reserve_tokens,
        }
    }

    /// Does an input of this length leave room for the extraction output?
    pub fn fits(&self, input_len: usize) -> bool {
        input_len + self.completion_reserve_tokens <= self.max_total_tokens
    }

    /// Largest input a single summarization call may carry.
    pub fn chunk_size_limit(&self) -> usize {
        self.max_total_tokens - self.summary_reserve_tokens
    }

    /// Validate the budget constants.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_total_tokens == 0 {
            return Err("max_total_tokens must be greater than 0".to_string());
        }
        if self.completion_reserve_tokens >= self.max_total_tokens {
            return Err("completion_reserve_tokens must be smaller than max_total_tokens".to_string());
        }
        if self.summary_reserve_tokens >= self.max_total_tokens {
            return Err("summary_reserve_tokens must be smaller than max_total_tokens".to_string());
        }
        Ok(())
    }
}

impl Default for Budget {
    fn default() -> Self {
        Self {
            max_total_tokens: DEFAULT_MAX_TOTAL_TOKENS,
            completion_reserve_tokens: DEFAULT_COMPLETION_RESERVE_TOKENS,
            summary_reserve_tokens: DEFAULT_SUMMARY_RESERVE_TOKENS,
        }
    }
}
