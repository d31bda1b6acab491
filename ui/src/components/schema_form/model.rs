//! Schema to model derivation
//!
//! Turns a declarative document schema into a [`Model`]: per-field type
//! descriptors plus required flags, defaults and UI hints.
//!
//! Accepted descriptor forms:
//! - `"String"`, `"Number"`, `"Boolean"`, `"Date"`, `"Text"` (shorthand)
//! - `["String"]` or `{ "type": ["String"] }` (arrays)
//! - `{ "type": "ObjectId", "ref": "todos" }` (references)
//! - `{ "city": "String" }` or `{ "type": { "city": "String" } }` (nested schemas)

use serde_json::{Map, Value};

use super::types::{FieldModel, Model, PrimitiveKind, TypeDescriptor, UiHints};

/// Nesting limit for derived models
const MAX_DEPTH: usize = 16;

// ============================================================================
// Model Derivation
// ============================================================================

/// Derive a model from a schema value.
///
/// A non-object schema yields an empty model.
pub fn derive_model(schema: &Value) -> Model {
    match schema {
        Value::Object(map) => derive_object(map, 0),
        Value::Null => Model::default(),
        other => {
            log::error!("Schema must be an object, got {}", json_kind(other));
            Model::default()
        }
    }
}

fn derive_object(map: &Map<String, Value>, depth: usize) -> Model {
    if depth > MAX_DEPTH {
        log::warn!("Schema nesting exceeds {} levels; truncating", MAX_DEPTH);
        return Model::default();
    }

    let fields = map
        .iter()
        .map(|(name, raw)| derive_field(name, raw, depth))
        .collect();

    Model { fields }
}

/// Derive a single field from its raw descriptor
pub fn derive_field(name: &str, raw: &Value, depth: usize) -> FieldModel {
    match raw {
        Value::String(type_name) => {
            let mut field = FieldModel::new(name, primitive_descriptor(name, type_name, None));
            if let Some((_, true)) = PrimitiveKind::from_type_name(type_name) {
                field.hints.multiline = true;
            }
            field
        }
        Value::Array(items) => FieldModel::new(name, array_descriptor(name, items, depth)),
        Value::Object(map) if is_nested_schema(map) => {
            FieldModel::new(name, TypeDescriptor::Object(derive_object(map, depth + 1)))
        }
        Value::Object(map) => derive_field_with_options(name, map, depth),
        other => {
            log::warn!(
                "Field '{}' has unsupported descriptor ({}); treating as string",
                name,
                json_kind(other)
            );
            FieldModel::new(name, TypeDescriptor::Primitive(PrimitiveKind::String))
        }
    }
}

/// An object without a usable `type` key is a nested schema. So is one whose
/// `type` entry is itself a descriptor object carrying `type`: that declares a
/// field named `type`.
fn is_nested_schema(map: &Map<String, Value>) -> bool {
    match map.get("type") {
        None => true,
        Some(Value::Object(inner)) => inner.contains_key("type"),
        Some(_) => false,
    }
}

fn derive_field_with_options(name: &str, map: &Map<String, Value>, depth: usize) -> FieldModel {
    let type_value = map.get("type").unwrap_or(&Value::Null);
    let reference = map.get("ref").and_then(Value::as_str);

    let descriptor = match type_value {
        Value::String(type_name) => primitive_descriptor(name, type_name, reference),
        Value::Array(items) => array_descriptor(name, items, depth),
        Value::Object(nested) => TypeDescriptor::Object(derive_object(nested, depth + 1)),
        other => {
            log::warn!(
                "Field '{}' has unsupported type ({}); treating as string",
                name,
                json_kind(other)
            );
            TypeDescriptor::Primitive(PrimitiveKind::String)
        }
    };

    let mut field = FieldModel::new(name, descriptor);
    field.required = map.get("required").and_then(Value::as_bool).unwrap_or(false);
    field.default = map.get("default").cloned();
    field.hints = extract_hints(map);

    if let Value::String(type_name) = type_value {
        if let Some((_, true)) = PrimitiveKind::from_type_name(type_name) {
            field.hints.multiline = true;
        }
    }

    field
}

fn primitive_descriptor(name: &str, type_name: &str, reference: Option<&str>) -> TypeDescriptor {
    if type_name.eq_ignore_ascii_case("objectid") {
        return match reference {
            Some(collection) => TypeDescriptor::Reference {
                collection: collection.to_string(),
            },
            None => {
                log::warn!("Field '{}' is an ObjectId without 'ref'; treating as string", name);
                TypeDescriptor::Primitive(PrimitiveKind::String)
            }
        };
    }

    match PrimitiveKind::from_type_name(type_name) {
        Some((kind, _)) => TypeDescriptor::Primitive(kind),
        None => {
            log::warn!(
                "Field '{}' has unknown type '{}'; treating as string",
                name,
                type_name
            );
            TypeDescriptor::Primitive(PrimitiveKind::String)
        }
    }
}

fn array_descriptor(name: &str, items: &[Value], depth: usize) -> TypeDescriptor {
    if items.len() > 1 {
        log::warn!(
            "Array field '{}' lists {} item types; using the first",
            name,
            items.len()
        );
    }

    let item = match items.first() {
        Some(raw) => derive_field(name, raw, depth + 1),
        None => FieldModel::new(name, TypeDescriptor::Primitive(PrimitiveKind::String)),
    };

    TypeDescriptor::Array(Box::new(item))
}

fn extract_hints(map: &Map<String, Value>) -> UiHints {
    UiHints {
        label: map.get("label").and_then(Value::as_str).map(String::from),
        placeholder: map.get("placeholder").and_then(Value::as_str).map(String::from),
        multiline: map.get("multiline").and_then(Value::as_bool).unwrap_or(false),
        hidden: map.get("hidden").and_then(Value::as_bool).unwrap_or(false),
        enum_values: map
            .get("enum")
            .and_then(Value::as_array)
            .map(|values| {
                values
                    .iter()
                    .filter_map(|v| match v {
                        Value::String(s) => Some(s.clone()),
                        Value::Null => None,
                        other => Some(other.to_string()),
                    })
                    .collect()
            })
            .unwrap_or_default(),
        min: map.get("min").and_then(Value::as_f64),
        max: map.get("max").and_then(Value::as_f64),
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// Tests
// ============================================================================
