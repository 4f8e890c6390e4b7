//! Per-document extraction results

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A structured record recovered from one document.
///
/// Every requested field is present in `fields`; a field the model could not
/// find is an explicit JSON null, never omitted. Created once per document
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionRecord {
    /// Requested field name to extracted value (explicit null for gaps)
    #[serde(flatten)]
    pub fields: Map<String, Value>,

    /// Model-reported confidence in [0, 1], passed through as provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl ExtractionRecord {
    /// Look up an extracted field value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Is the field present but explicitly null?
    pub fn is_null(&self, name: &str) -> bool {
        matches!(self.fields.get(name), Some(Value::Null))
    }
}

/// The tagged result of processing one document.
///
/// A batch run produces exactly one outcome per document; failures local to
/// one document never abort the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocumentOutcome {
    /// Parsing succeeded; the record holds every requested field
    Structured {
        /// Document identifier (filename)
        document: String,
        /// The recovered record
        record: ExtractionRecord,
        /// Non-fatal warnings gathered along the way (e.g. truncation)
        warnings: Vec<String>,
    },

    /// Parsing failed; the raw model output is kept so nothing is lost
    Degraded {
        /// Document identifier (filename)
        document: String,
        /// The unparsed model output, untouched
        raw_text: String,
        /// Why parsing failed
        reason: String,
        /// Non-fatal warnings gathered along the way
        warnings: Vec<String>,
    },

    /// Processing could not produce any output for this document
    Failed {
        /// Document identifier (filename)
        document: String,
        /// Why processing failed
        reason: String,
    },
}

impl DocumentOutcome {
    /// The document this outcome belongs to.
    pub fn document(&self) -> &str {
        match self {
            DocumentOutcome::Structured { document, .. }
            | DocumentOutcome::Degraded { document, .. }
            | DocumentOutcome::Failed { document, .. } => document,
        }
    }

    /// Did this document produce a structured record?
    pub fn is_structured(&self) -> bool {
        matches!(self, DocumentOutcome::Structured { .. })
    }

    /// Warnings recorded for this document, if any.
    pub fn warnings(&self) -> &[String] {
        match self {
            DocumentOutcome::Structured { warnings, .. }
            | DocumentOutcome::Degraded { warnings, .. } => warnings,
            DocumentOutcome::Failed { .. } => &[],
        }
    }
}
