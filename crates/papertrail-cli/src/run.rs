//! Batch execution: one outcome per document, written as a numbered report.

use crate::error::Result;
use papertrail_domain::{CompletionBackend, DocumentOutcome, TextSource};
use papertrail_extractor::Pipeline;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Aggregate output of one run: exactly one entry per processed document.
#[derive(Debug, Serialize, Deserialize)]
pub struct RunReport {
    /// Per-document outcomes, in processing order
    pub responses: Vec<DocumentOutcome>,
}

impl RunReport {
    /// Count outcomes by kind: (structured, degraded, failed).
    pub fn tally(&self) -> (usize, usize, usize) {
        let mut counts = (0, 0, 0);
        for outcome in &self.responses {
            match outcome {
                DocumentOutcome::Structured { .. } => counts.0 += 1,
                DocumentOutcome::Degraded { .. } => counts.1 += 1,
                DocumentOutcome::Failed { .. } => counts.2 += 1,
            }
        }
        counts
    }
}

/// Process every document sequentially, containing failures per document.
///
/// A text-acquisition failure yields a failed placeholder entry and the run
/// moves on; no document is ever silently missing from the report.
pub fn run_batch<B, S>(
    pipeline: &Pipeline<B>,
    source: &S,
    files: &[PathBuf],
    save_text: bool,
) -> RunReport
where
    B: CompletionBackend,
    B::Error: std::fmt::Display,
    S: TextSource,
    S::Error: std::fmt::Display,
{
    let mut responses = Vec::with_capacity(files.len());

    for path in files {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let outcome = match source.get_text(path) {
            Ok(text) => {
                if save_text {
                    persist_text(path, &text);
                }
                pipeline.process(&filename, &text)
            }
            Err(e) => {
                warn!(document = %filename, error = %e, "text acquisition failed, skipping");
                DocumentOutcome::Failed {
                    document: filename.clone(),
                    reason: format!("text acquisition failed: {}", e),
                }
            }
        };

        responses.push(outcome);
    }

    RunReport { responses }
}

/// Write the acquired text next to the source document for inspection.
/// Failures here are logged, never fatal.
fn persist_text(path: &Path, text: &str) {
    let sidecar = path.with_extension("txt");
    if sidecar == path {
        return;
    }
    if let Err(e) = fs::write(&sidecar, text) {
        warn!(path = %sidecar.display(), error = %e, "could not persist extracted text");
    }
}

/// List the documents to process: files in `dir` with the given extension,
/// sorted by name for a stable processing order.
pub fn list_documents(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|e| e == extension) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// First free `output<N>.json` path in `dir`, so no prior run is overwritten.
pub fn next_output_path(dir: &Path) -> PathBuf {
    let mut n = 1;
    loop {
        let candidate = dir.join(format!("output{}.json", n));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

/// Serialize the run report to `path` as pretty-printed JSON.
pub fn write_report(path: &Path, report: &RunReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json)?;
    info!(path = %path.display(), "run report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::FileTextSource;
    use papertrail_extractor::PipelineConfig;
    use papertrail_llm::MockBackend;

    const RECORD_JSON: &str =
        r#"{"date": "2023-01-15", "client_name": "Acme", "location": null, "confidence": 0.8}"#;

    #[test]
    fn test_batch_contains_one_entry_per_document() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "doc a").unwrap();
        fs::write(dir.path().join("b.txt"), "doc b").unwrap();

        let pipeline =
            Pipeline::new(MockBackend::new(RECORD_JSON), PipelineConfig::default()).unwrap();
        let files = list_documents(dir.path(), "txt").unwrap();
        let report = run_batch(&pipeline, &FileTextSource, &files, false);

        assert_eq!(report.responses.len(), 2);
        assert_eq!(report.tally(), (2, 0, 0));
    }

    #[test]
    fn test_acquisition_failure_is_contained() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("good.txt"), "readable").unwrap();

        let pipeline =
            Pipeline::new(MockBackend::new(RECORD_JSON), PipelineConfig::default()).unwrap();
        let files = vec![
            dir.path().join("missing.txt"),
            dir.path().join("good.txt"),
        ];
        let report = run_batch(&pipeline, &FileTextSource, &files, false);

        assert_eq!(report.responses.len(), 2);
        assert!(matches!(
            &report.responses[0],
            DocumentOutcome::Failed { document, .. } if document == "missing.txt"
        ));
        assert!(report.responses[1].is_structured());
    }

    #[test]
    fn test_list_documents_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "").unwrap();
        fs::write(dir.path().join("a.txt"), "").unwrap();
        fs::write(dir.path().join("skip.pdf"), "").unwrap();

        let files = list_documents(dir.path(), "txt").unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("a.txt"));
        assert!(files[1].ends_with("b.txt"));
    }

    #[test]
    fn test_next_output_path_skips_existing_runs() {
        let dir = tempfile::tempdir().unwrap();
        assert!(next_output_path(dir.path()).ends_with("output1.json"));

        fs::write(dir.path().join("output1.json"), "{}").unwrap();
        fs::write(dir.path().join("output2.json"), "{}").unwrap();
        assert!(next_output_path(dir.path()).ends_with("output3.json"));
    }

    #[test]
    fn test_report_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let report = RunReport {
            responses: vec![DocumentOutcome::Failed {
                document: "x.txt".to_string(),
                reason: "unreadable".to_string(),
            }],
        };

        let path = dir.path().join("output1.json");
        write_report(&path, &report).unwrap();

        let loaded: RunReport =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.responses.len(), 1);
        assert_eq!(loaded.tally(), (0, 0, 1));
    }

    #[test]
    fn test_sidecar_text_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("scan.text");
        fs::write(&doc, "scanned body").unwrap();

        let pipeline =
            Pipeline::new(MockBackend::new(RECORD_JSON), PipelineConfig::default()).unwrap();
        run_batch(&pipeline, &FileTextSource, &[doc.clone()], true);

        let sidecar = dir.path().join("scan.txt");
        assert_eq!(fs::read_to_string(sidecar).unwrap(), "scanned body");
    }
}
