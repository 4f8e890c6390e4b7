//! Per-document orchestration: fit budget, extract, parse

use crate::config::PipelineConfig;
use crate::error::ExtractError;
use crate::parser::parse_response;
use crate::prompt::PromptBuilder;
use crate::reducer::SummarizationReducer;
use papertrail_domain::{
    Completion, CompletionBackend, CompletionRequest, DocumentOutcome,
};
use tracing::{debug, info, warn};

/// Runs the full extraction pipeline for one document at a time.
///
/// Processing is strictly sequential: one document is fully pipelined
/// (fit budget → extract → parse) before the next begins, and every backend
/// call blocks until it completes. No state crosses document boundaries.
pub struct Pipeline<B: CompletionBackend> {
    backend: B,
    config: PipelineConfig,
}

impl<B> Pipeline<B>
where
    B: CompletionBackend,
    B::Error: std::fmt::Display,
{
    /// Create a pipeline over a backend, validating the configuration.
    pub fn new(backend: B, config: PipelineConfig) -> Result<Self, ExtractError> {
        config.validate().map_err(ExtractError::Config)?;
        Ok(Self { backend, config })
    }

    /// The active configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process one document end to end.
    ///
    /// Never fails outward: every document yields a tagged outcome so a batch
    /// always contains one entry per document. Parse failures degrade to the
    /// raw model text; budget and backend failures mark the document failed.
    pub fn process(&self, filename: &str, text: &str) -> DocumentOutcome {
        info!(document = filename, length = text.len(), "processing document");

        let reducer = SummarizationReducer::new(
            &self.backend,
            self.config.budget,
            self.config.max_reduction_passes,
        );

        let reduced = match reducer.ensure_fits(text) {
            Ok(reduced) => reduced,
            Err(e) => {
                warn!(document = filename, error = %e, "could not fit text into budget");
                return DocumentOutcome::Failed {
                    document: filename.to_string(),
                    reason: e.to_string(),
                };
            }
        };
        let mut warnings = reduced.warnings;

        let completion = match self.extract(&reduced.text, filename) {
            Ok(completion) => completion,
            Err(e) => {
                warn!(document = filename, error = %e, "extraction call failed");
                return DocumentOutcome::Failed {
                    document: filename.to_string(),
                    reason: e.to_string(),
                };
            }
        };

        if completion.is_truncated() {
            let message = "extraction output hit its token ceiling".to_string();
            warn!(document = filename, "{}", message);
            warnings.push(message);
        }

        match parse_response(&completion.text, &self.config.fields) {
            Ok(record) => {
                info!(document = filename, "structured record recovered");
                DocumentOutcome::Structured {
                    document: filename.to_string(),
                    record,
                    warnings,
                }
            }
            Err(e) => {
                // Keep the raw text so the document still records something
                warn!(document = filename, error = %e, "parse failed, degrading to raw text");
                DocumentOutcome::Degraded {
                    document: filename.to_string(),
                    raw_text: completion.text,
                    reason: e.to_string(),
                    warnings,
                }
            }
        }
    }

    /// Run the extraction call for budget-fitted text and return the raw
    /// completion unmodified. Parsing is the caller's responsibility.
    fn extract(&self, text: &str, filename: &str) -> Result<Completion, ExtractError> {
        debug_assert!(self.config.budget.fits(text.len()));

        let prompt = PromptBuilder::new(text, filename, &self.config.fields).build();
        debug!(prompt_length = prompt.len(), "running extraction call");

        let request =
            CompletionRequest::new(prompt, self.config.budget.completion_reserve_tokens);

        self.backend
            .complete(&request)
            .map_err(|e| ExtractError::Backend(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use papertrail_domain::FieldSpec;
    use papertrail_llm::MockBackend;

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = PipelineConfig::default();
        config.fields = FieldSpec::new(Vec::<String>::new());

        let result = Pipeline::new(MockBackend::default(), config);
        assert!(matches!(result, Err(ExtractError::Config(_))));
    }

    #[test]
    fn test_structured_outcome() {
        let backend = MockBackend::new(
            r#"{"date": "2023-01-15", "client_name": "Acme", "location": null, "confidence": 0.8}"#,
        );
        let pipeline = Pipeline::new(backend, PipelineConfig::default()).unwrap();

        let outcome = pipeline.process("invoice.pdf", "Invoice from Acme, 2023-01-15");
        match outcome {
            DocumentOutcome::Structured { document, record, warnings } => {
                assert_eq!(document, "invoice.pdf");
                assert_eq!(record.confidence, Some(0.8));
                assert!(record.is_null("location"));
                assert!(warnings.is_empty());
            }
            other => panic!("Expected structured outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_unparseable_output_degrades() {
        let backend = MockBackend::new("I am sorry, I cannot help with that.");
        let pipeline = Pipeline::new(backend, PipelineConfig::default()).unwrap();

        let outcome = pipeline.process("scan.pdf", "some text");
        match outcome {
            DocumentOutcome::Degraded { raw_text, reason, .. } => {
                assert_eq!(raw_text, "I am sorry, I cannot help with that.");
                assert!(reason.contains("No JSON object"));
            }
            other => panic!("Expected degraded outcome, got {:?}", other),
        }
    }
}
