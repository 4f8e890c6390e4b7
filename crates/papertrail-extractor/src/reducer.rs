//! Summarization until the text fits the extraction budget

use crate::chunking::LineChunker;
use crate::error::ExtractError;
use crate::prompt::summarization_prompt;
use papertrail_domain::{Budget, CompletionBackend, CompletionRequest};
use tracing::{debug, info, warn};

/// Text reduced to fit the budget, plus any warnings gathered on the way.
#[derive(Debug, Clone)]
pub struct ReducedText {
    /// The budget-fitted text
    pub text: String,
    /// Non-fatal warnings (truncated summarization outputs)
    pub warnings: Vec<String>,
    /// Summarization passes performed (0 when the input already fit)
    pub passes: usize,
}

/// Repeatedly summarizes text until it fits the extraction budget.
///
/// The reduction is a fixed-point iteration over text length: each pass must
/// shrink the text, and a pass that fails to do so ends the loop with
/// [`ExtractError::BudgetUnreachable`] rather than retrying forever.
pub struct SummarizationReducer<'a, B: CompletionBackend> {
    backend: &'a B,
    budget: Budget,
    max_passes: usize,
}

impl<'a, B> SummarizationReducer<'a, B>
where
    B: CompletionBackend,
    B::Error: std::fmt::Display,
{
    /// Create a reducer over the given backend and budget.
    pub fn new(backend: &'a B, budget: Budget, max_passes: usize) -> Self {
        Self {
            backend,
            budget,
            max_passes,
        }
    }

    /// Shrink `text` until it leaves room for the extraction output.
    ///
    /// Returns the input unchanged (zero backend calls) when it already fits.
    pub fn ensure_fits(&self, text: &str) -> Result<ReducedText, ExtractError> {
        let mut current = text.to_string();
        let mut warnings = Vec::new();
        let mut passes = 0;

        while !self.budget.fits(current.len()) {
            if passes >= self.max_passes {
                return Err(ExtractError::BudgetUnreachable {
                    iterations: passes,
                    length: current.len(),
                });
            }

            debug!(
                pass = passes + 1,
                length = current.len(),
                "text exceeds budget, summarizing"
            );

            let candidate = self.summarize_pass(&current, &mut warnings)?;
            passes += 1;

            // The candidate was over budget before this pass; if it did not
            // shrink it cannot fit now or on any later pass.
            if candidate.len() >= current.len() {
                warn!(
                    length = candidate.len(),
                    "summarization produced no size reduction"
                );
                return Err(ExtractError::BudgetUnreachable {
                    iterations: passes,
                    length: candidate.len(),
                });
            }

            current = candidate;
        }

        if passes > 0 {
            info!(
                passes,
                final_length = current.len(),
                "text reduced to fit budget"
            );
        }

        Ok(ReducedText {
            text: current,
            warnings,
            passes,
        })
    }

    /// One reduction pass: whole-text when it fits a single summarization
    /// call, otherwise chunk-wise with summaries joined by newlines.
    fn summarize_pass(
        &self,
        text: &str,
        warnings: &mut Vec<String>,
    ) -> Result<String, ExtractError> {
        let chunk_limit = self.budget.chunk_size_limit();

        if text.len() <= chunk_limit {
            return self.summarize_one(text, warnings);
        }

        let chunks = LineChunker::new(chunk_limit).chunk(text);
        debug!(chunks = chunks.len(), "summarizing chunk-wise");

        let mut summaries = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            summaries.push(self.summarize_one(&chunk.text, warnings)?);
        }

        Ok(summaries.join("\n"))
    }

    /// Single summarization call with the summary output reserve.
    fn summarize_one(&self, text: &str, warnings: &mut Vec<String>) -> Result<String, ExtractError> {
        let request = CompletionRequest::new(
            summarization_prompt(text),
            self.budget.summary_reserve_tokens,
        );

        let completion = self
            .backend
            .complete(&request)
            .map_err(|e| ExtractError::Backend(e.to_string()))?;

        if completion.is_truncated() {
            let message = "summarization output hit its token ceiling".to_string();
            warn!("{}", message);
            warnings.push(message);
        }

        Ok(completion.text)
    }
}
