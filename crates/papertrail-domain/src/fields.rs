//! Field specification for structured extraction

use serde::{Deserialize, Serialize};

/// The ordered set of field names to extract from every document.
///
/// Fixed per run, never derived from input text. Order is preserved both in
/// the extraction prompt and in the parsed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    names: Vec<String>,
}

impl FieldSpec {
    /// Create a field spec from an ordered list of names.
    pub fn new(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// The field names, in extraction order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True when no fields were specified.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Does the spec contain this field name?
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}

impl Default for FieldSpec {
    /// The standard document-record fields: date, client name, location.
    fn default() -> Self {
        Self::new(["date", "client_name", "location"])
    }
}
