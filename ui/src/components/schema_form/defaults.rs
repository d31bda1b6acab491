//! Initial values for schema fields
//!
//! An existing value is reused when its shape already matches the field's
//! descriptor. Otherwise the schema `default` is used if it matches, and
//! failing that a zero value is synthesized.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use super::types::{FieldModel, Model, PrimitiveKind, TypeDescriptor};

/// Initial value for a field, given the value currently stored (if any).
///
/// Matching objects are completed: missing sub-fields receive their own
/// initial values while present ones are kept. Matching arrays are reused
/// as-is.
pub fn initial_value(field: &FieldModel, existing: Option<&Value>, now: DateTime<Utc>) -> Value {
    if let Some(value) = existing.filter(|v| field.descriptor.shape_matches(v)) {
        return complete(&field.descriptor, value, now);
    }

    if let Some(default) = field
        .default
        .as_ref()
        .filter(|d| field.descriptor.shape_matches(d))
    {
        return complete(&field.descriptor, default, now);
    }

    zero_value(&field.descriptor, now)
}

/// Initial document for a model, merging into `existing` when it is an object
pub fn initial_document(model: &Model, existing: Option<&Value>, now: DateTime<Utc>) -> Value {
    let base = existing.and_then(Value::as_object);
    Value::Object(complete_object(model, base, now))
}

/// Zero value for a descriptor, ignoring schema defaults at this level
pub fn zero_value(descriptor: &TypeDescriptor, now: DateTime<Utc>) -> Value {
    match descriptor {
        TypeDescriptor::Primitive(PrimitiveKind::String) => Value::String(String::new()),
        TypeDescriptor::Primitive(PrimitiveKind::Number) => Value::from(0),
        TypeDescriptor::Primitive(PrimitiveKind::Boolean) => Value::Bool(false),
        TypeDescriptor::Primitive(PrimitiveKind::Date) => Value::String(timestamp(now)),
        TypeDescriptor::Array(_) => Value::Array(Vec::new()),
        TypeDescriptor::Object(model) => Value::Object(complete_object(model, None, now)),
        TypeDescriptor::Reference { .. } => Value::String(String::new()),
    }
}

/// RFC 3339 timestamp with second precision, as stored for date fields
pub fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn complete(descriptor: &TypeDescriptor, value: &Value, now: DateTime<Utc>) -> Value {
    match (descriptor, value) {
        (TypeDescriptor::Object(model), Value::Object(map)) => {
            Value::Object(complete_object(model, Some(map), now))
        }
        _ => value.clone(),
    }
}

fn complete_object(
    model: &Model,
    existing: Option<&Map<String, Value>>,
    now: DateTime<Utc>,
) -> Map<String, Value> {
    // Keys outside the model survive untouched
    let mut out = existing.cloned().unwrap_or_default();
    for field in &model.fields {
        let value = initial_value(field, existing.and_then(|m| m.get(&field.name)), now);
        out.insert(field.name.clone(), value);
    }
    out
}

// ============================================================================
// Tests
// ============================================================================
