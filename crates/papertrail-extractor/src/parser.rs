//! Lenient JSON recovery from free-form model output

use crate::error::ExtractError;
use papertrail_domain::{ExtractionRecord, FieldSpec};
use serde_json::{Map, Value};
use tracing::debug;

/// Recover a structured record from raw model output.
///
/// The model is instructed to answer with only a JSON object, but may still
/// prepend or append commentary. The candidate span is the first `{` through
/// the last `}` after embedded line breaks are flattened (they can break the
/// object-boundary match). The span must decode as a JSON object; requested
/// fields the model omitted are recorded as explicit nulls, and the
/// confidence value is passed through exactly as provided.
///
/// # Errors
///
/// - [`ExtractError::NoJsonObject`] when no `{`…`}` span exists
/// - [`ExtractError::MalformedJson`] when the span fails to decode or is not
///   an object
pub fn parse_response(raw: &str, fields: &FieldSpec) -> Result<ExtractionRecord, ExtractError> {
    let flattened = raw.replace(['\r', '\n'], " ");

    let start = flattened.find('{').ok_or(ExtractError::NoJsonObject)?;
    let end = flattened.rfind('}').ok_or(ExtractError::NoJsonObject)?;
    if end < start {
        return Err(ExtractError::NoJsonObject);
    }

    let candidate = &flattened[start..=end];
    let value: Value = serde_json::from_str(candidate)
        .map_err(|e| ExtractError::MalformedJson(e.to_string()))?;

    let Value::Object(mut object) = value else {
        return Err(ExtractError::MalformedJson(
            "candidate span is not a JSON object".to_string(),
        ));
    };

    let mut record_fields = Map::new();
    for name in fields.names() {
        let value = match object.remove(name) {
            Some(value) => value,
            None => {
                // An omitted field is an extraction gap, not a hard error
                debug!(field = %name, "model response omitted a requested field");
                Value::Null
            }
        };
        record_fields.insert(name.clone(), value);
    }

    let confidence = object.get("confidence").and_then(Value::as_f64);

    Ok(ExtractionRecord {
        fields: record_fields,
        confidence,
    })
}
