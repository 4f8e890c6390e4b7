//! Integration tests for the extraction pipeline

#[cfg(test)]
mod tests {
    use crate::prompt::{summarization_prompt, PromptBuilder};
    use crate::{LineChunker, Pipeline, PipelineConfig};
    use papertrail_domain::{Budget, DocumentOutcome, FieldSpec};
    use papertrail_llm::MockBackend;

    const RECORD_JSON: &str =
        r#"{"date": "2023-01-15", "client_name": "Acme", "location": null, "confidence": 0.8}"#;

    #[test]
    fn test_short_document_skips_summarization() {
        let backend = MockBackend::new(RECORD_JSON);
        let pipeline = Pipeline::new(backend.clone(), PipelineConfig::default()).unwrap();

        // Well under the budget: straight to extraction
        let text = "Invoice 0142 issued to Acme on 2023-01-15.";
        assert!(text.len() < 100);

        let outcome = pipeline.process("invoice_0142.pdf", text);
        assert!(outcome.is_structured());
        assert_eq!(backend.call_count(), 1);
    }

    #[test]
    fn test_oversized_document_is_reduced_then_extracted() {
        let config = PipelineConfig::default();
        let budget = config.budget;
        let fields = config.fields.clone();

        // Two line-separated blocks that together exceed the budget but
        // individually fit a summarization call
        let text = format!("{}\n{}", "x".repeat(3000), "y".repeat(3000));
        assert!(!budget.fits(text.len()));

        let chunks = LineChunker::new(budget.chunk_size_limit()).chunk(&text);
        assert_eq!(chunks.len(), 2);

        let mut backend = MockBackend::new("unexpected prompt");
        backend.add_response(summarization_prompt(&chunks[0].text), "alpha summary");
        backend.add_response(summarization_prompt(&chunks[1].text), "beta summary");

        let extraction_prompt =
            PromptBuilder::new("alpha summary\nbeta summary", "bundle.pdf", &fields).build();
        backend.add_response(extraction_prompt, RECORD_JSON);

        let pipeline = Pipeline::new(backend.clone(), config).unwrap();
        let outcome = pipeline.process("bundle.pdf", &text);

        assert!(outcome.is_structured(), "got {:?}", outcome);
        // Two summarization calls plus one extraction call
        assert_eq!(backend.call_count(), 3);
    }

    #[test]
    fn test_truncated_extraction_still_parses() {
        // The backend reports a token-ceiling stop but the text is usable
        let backend = MockBackend::truncated(RECORD_JSON);
        let pipeline = Pipeline::new(backend, PipelineConfig::default()).unwrap();

        let outcome = pipeline.process("scan.pdf", "short text");
        match outcome {
            DocumentOutcome::Structured { record, warnings, .. } => {
                assert_eq!(record.confidence, Some(0.8));
                assert_eq!(warnings.len(), 1);
                assert!(warnings[0].contains("token ceiling"));
            }
            other => panic!("Expected structured outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_fields_are_explicit_nulls() {
        let backend = MockBackend::new(r#"{"client_name": "Acme Corp", "confidence": 0.6}"#);
        let pipeline = Pipeline::new(backend, PipelineConfig::default()).unwrap();

        let outcome = pipeline.process("letter.pdf", "Dear Acme Corp, ...");
        match outcome {
            DocumentOutcome::Structured { record, .. } => {
                assert!(record.is_null("date"));
                assert!(record.is_null("location"));
                assert_eq!(
                    record.get("client_name"),
                    Some(&serde_json::json!("Acme Corp"))
                );
                assert_eq!(record.confidence, Some(0.6));
            }
            other => panic!("Expected structured outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_unreachable_budget_fails_the_document() {
        // Summaries never shrink, so reduction cannot converge
        let mut config = PipelineConfig::default();
        config.budget = Budget::new(500, 100, 20);

        let text = "a".repeat(450);
        let backend = MockBackend::new("b".repeat(450));
        let pipeline = Pipeline::new(backend, config).unwrap();

        let outcome = pipeline.process("huge.pdf", &text);
        match outcome {
            DocumentOutcome::Failed { document, reason } => {
                assert_eq!(document, "huge.pdf");
                assert!(reason.contains("Budget unreachable"));
            }
            other => panic!("Expected failed outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_field_spec_flows_through() {
        let mut config = PipelineConfig::default();
        config.fields = FieldSpec::new(["invoice_number", "total"]);

        let backend =
            MockBackend::new(r#"{"invoice_number": "INV-7", "confidence": 0.9}"#);
        let pipeline = Pipeline::new(backend, config).unwrap();

        let outcome = pipeline.process("inv.pdf", "Invoice INV-7");
        match outcome {
            DocumentOutcome::Structured { record, .. } => {
                assert_eq!(
                    record.get("invoice_number"),
                    Some(&serde_json::json!("INV-7"))
                );
                assert!(record.is_null("total"));
            }
            other => panic!("Expected structured outcome, got {:?}", other),
        }
    }
}
