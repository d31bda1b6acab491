//! Server-side document checks against a collection schema

use serde_json::{Map, Value};

use crate::persistence::StoreError;

/// Top-level field names the schema marks `required: true`
pub fn required_fields(schema: &Value) -> Vec<&str> {
    let Some(fields) = schema.as_object() else {
        return Vec::new();
    };
    fields
        .iter()
        .filter(|(_, raw)| match raw {
            Value::Object(options) if !is_nested_schema(options) => {
                options.get("required").and_then(Value::as_bool).unwrap_or(false)
            }
            _ => false,
        })
        .map(|(name, _)| name.as_str())
        .collect()
}

/// Objects without a usable `type` key, or whose `type` entry is itself a
/// descriptor, describe nested fields rather than options
fn is_nested_schema(map: &Map<String, Value>) -> bool {
    match map.get("type") {
        None => true,
        Some(Value::Object(inner)) => inner.contains_key("type"),
        Some(_) => false,
    }
}

/// Data must be an object with every required field present, non-null and,
/// for strings, non-blank
pub fn validate_document(schema: &Value, data: &Value) -> Result<(), StoreError> {
    let Some(map) = data.as_object() else {
        return Err(StoreError::Validation("document data must be a JSON object".to_string()));
    };

    let missing: Vec<&str> = required_fields(schema)
        .into_iter()
        .filter(|name| match map.get(*name) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(_) => false,
        })
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(StoreError::Validation(format!(
            "missing required fields: {}",
            missing.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schemas::builtin_schema;
    use crate::domain::Collection;
    use serde_json::json;

    #[test]
    fn test_required_fields_of_builtins() {
        assert_eq!(
            required_fields(&builtin_schema(Collection::Journal)),
            vec!["title", "body", "date"]
        );
        assert_eq!(required_fields(&builtin_schema(Collection::Todos)), vec!["title"]);
        assert_eq!(required_fields(&builtin_schema(Collection::Planner)), vec!["title", "day"]);
    }

    #[test]
    fn test_nested_type_field_is_not_an_option_object() {
        let schema = json!({
            "meta": { "type": { "type": "String", "required": true }, "required": true }
        });
        assert!(required_fields(&schema).is_empty());
    }

    #[test]
    fn test_validate_document() {
        let schema = builtin_schema(Collection::Planner);
        assert!(validate_document(&schema, &json!({ "title": "Gym", "day": "2024-01-01T00:00:00Z" })).is_ok());

        let err = validate_document(&schema, &json!({ "title": "  ", "day": null })).unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: missing required fields: title, day");

        assert!(matches!(
            validate_document(&schema, &json!(["not", "an", "object"])),
            Err(StoreError::Validation(_))
        ));
    }
}
