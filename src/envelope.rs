//! Normalizing extraction for the `data`/`attributes` JSON envelope.
//!
//! Every OSU endpoint wraps its payload as either
//! `{"data": {"attributes": {...}}}` (singular resource) or
//! `{"data": [{"attributes": {...}}, ...]}` (collection). The extractor
//! accepts both and hands back one attribute map, reporting exactly which
//! layer was absent otherwise.

use serde_json::{Map, Value};

use crate::error::ShapeError;

/// Descends into `envelope` and returns the attribute map, from `data`
/// directly or from `data[0]`.
pub fn extract_attributes(envelope: &Value) -> Result<&Map<String, Value>, ShapeError> {
    let obj = match envelope {
        Value::Null => return Err(ShapeError::EmptyResponse),
        Value::Object(obj) if obj.is_empty() => return Err(ShapeError::EmptyResponse),
        Value::Array(items) if items.is_empty() => return Err(ShapeError::EmptyResponse),
        Value::Object(obj) => obj,
        // Non-empty but not an object: there is nothing to look `data` up in.
        _ => return Err(ShapeError::MissingData),
    };

    let data = obj.get("data").ok_or(ShapeError::MissingData)?;

    if let Some(attrs) = data.get("attributes").and_then(Value::as_object) {
        return Ok(attrs);
    }

    if let Some(first) = data.as_array().and_then(|items| items.first()) {
        if let Some(attrs) = first.get("attributes").and_then(Value::as_object) {
            return Ok(attrs);
        }
    }

    Err(ShapeError::MissingAttributes)
}

/// Renders a JSON leaf as display text. Strings come through unquoted;
/// numeric IDs and ETAs keep their JSON rendering.
pub fn field_text(value: &Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_envelope() {
        assert_eq!(extract_attributes(&json!({})), Err(ShapeError::EmptyResponse));
        assert_eq!(extract_attributes(&Value::Null), Err(ShapeError::EmptyResponse));
        assert_eq!(extract_attributes(&json!([])), Err(ShapeError::EmptyResponse));
    }

    #[test]
    fn test_missing_data() {
        let envelope = json!({"meta": {"count": 0}});
        assert_eq!(extract_attributes(&envelope), Err(ShapeError::MissingData));
    }

    #[test]
    fn test_non_object_envelope_has_no_data() {
        // A bare array or scalar is not empty, it just has no `data` layer.
        assert_eq!(
            extract_attributes(&json!([{"attributes": {"x": 1}}])),
            Err(ShapeError::MissingData)
        );
        assert_eq!(extract_attributes(&json!("ok")), Err(ShapeError::MissingData));
    }

    #[test]
    fn test_data_without_attributes() {
        assert_eq!(
            extract_attributes(&json!({"data": {}})),
            Err(ShapeError::MissingAttributes)
        );
        assert_eq!(
            extract_attributes(&json!({"data": []})),
            Err(ShapeError::MissingAttributes)
        );
        assert_eq!(
            extract_attributes(&json!({"data": [{"id": "1"}]})),
            Err(ShapeError::MissingAttributes)
        );
    }

    #[test]
    fn test_singular_resource() {
        let envelope = json!({"data": {"attributes": {"x": 1}}});
        let attrs = extract_attributes(&envelope).unwrap();
        assert_eq!(attrs.get("x"), Some(&json!(1)));
    }

    #[test]
    fn test_field_text_unquotes_strings_and_keeps_numbers() {
        assert_eq!(field_text(&json!("North")), "North");
        assert_eq!(field_text(&json!(42)), "42");
    }

    #[test]
    fn test_collection_uses_first_element() {
        let envelope = json!({"data": [
            {"attributes": {"x": 1}},
            {"attributes": {"x": 2}},
        ]});
        let attrs = extract_attributes(&envelope).unwrap();
        assert_eq!(attrs.get("x"), Some(&json!(1)));
    }
}
