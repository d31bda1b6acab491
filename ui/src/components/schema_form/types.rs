//! Core types for schema-driven document forms

use serde_json::Value;
use std::fmt;

// ============================================================================
// Primitive Kinds
// ============================================================================

/// Scalar data types a schema field can carry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    String,
    Number,
    Boolean,
    /// Stored as an RFC 3339 timestamp string
    Date,
}

impl PrimitiveKind {
    /// Parse a schema type name (case-insensitive).
    ///
    /// Returns the kind and whether the name implies a multiline editor.
    pub fn from_type_name(name: &str) -> Option<(Self, bool)> {
        match name.to_ascii_lowercase().as_str() {
            "string" => Some((PrimitiveKind::String, false)),
            "text" => Some((PrimitiveKind::String, true)),
            "number" | "integer" => Some((PrimitiveKind::Number, false)),
            "boolean" | "bool" => Some((PrimitiveKind::Boolean, false)),
            "date" | "datetime" => Some((PrimitiveKind::Date, false)),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Number => "number",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Date => "date",
        }
    }

    /// Check whether a JSON value has this kind's shape
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            PrimitiveKind::String | PrimitiveKind::Date => value.is_string(),
            PrimitiveKind::Number => value.is_number(),
            PrimitiveKind::Boolean => value.is_boolean(),
        }
    }
}

// ============================================================================
// Type Descriptor
// ============================================================================

/// Shape of a field after schema derivation
#[derive(Clone, Debug, PartialEq)]
pub enum TypeDescriptor {
    Primitive(PrimitiveKind),
    /// Array whose items are described by the boxed field model
    Array(Box<FieldModel>),
    /// Nested schema
    Object(Model),
    /// Id of a document in another collection
    Reference { collection: String },
}

impl TypeDescriptor {
    pub fn type_name(&self) -> &'static str {
        match self {
            TypeDescriptor::Primitive(kind) => kind.type_name(),
            TypeDescriptor::Array(_) => "array",
            TypeDescriptor::Object(_) => "object",
            TypeDescriptor::Reference { .. } => "reference",
        }
    }

    /// Array-for-array, object-for-object, primitive-for-primitive
    pub fn shape_matches(&self, value: &Value) -> bool {
        match self {
            TypeDescriptor::Primitive(kind) => kind.matches(value),
            TypeDescriptor::Array(_) => value.is_array(),
            TypeDescriptor::Object(_) => value.is_object(),
            TypeDescriptor::Reference { .. } => value.is_string(),
        }
    }
}

// ============================================================================
// UI Hints
// ============================================================================

/// Presentation metadata carried by a field descriptor
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UiHints {
    pub label: Option<String>,
    pub placeholder: Option<String>,
    /// Render strings as a textarea
    pub multiline: bool,
    /// Never rendered; the value is still carried through
    pub hidden: bool,
    /// Allowed string values (rendered as a select)
    pub enum_values: Vec<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

// ============================================================================
// Field Model
// ============================================================================

/// A single schema field with derived metadata
#[derive(Clone, Debug, PartialEq)]
pub struct FieldModel {
    pub name: String,
    pub descriptor: TypeDescriptor,
    pub required: bool,
    /// Explicit `default` from the schema
    pub default: Option<Value>,
    pub hints: UiHints,
}

impl FieldModel {
    pub fn new(name: impl Into<String>, descriptor: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            descriptor,
            required: false,
            default: None,
            hints: UiHints::default(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.descriptor.type_name()
    }

    /// Display label: explicit hint, otherwise the humanized field name
    pub fn label(&self) -> String {
        self.hints
            .label
            .clone()
            .unwrap_or_else(|| humanize(&self.name))
    }

    /// Sub-model for nested objects
    pub fn sub_model(&self) -> Option<&Model> {
        match &self.descriptor {
            TypeDescriptor::Object(model) => Some(model),
            _ => None,
        }
    }

    /// Item model for arrays
    pub fn items(&self) -> Option<&FieldModel> {
        match &self.descriptor {
            TypeDescriptor::Array(items) => Some(items),
            _ => None,
        }
    }
}

/// `dueDate` / `due_date` -> `Due date`
fn humanize(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch == '_' || ch == '-' {
            out.push(' ');
        } else if ch.is_uppercase() && i > 0 {
            out.push(' ');
            out.extend(ch.to_lowercase());
        } else if i == 0 {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
    }
    out
}

// ============================================================================
// Model
// ============================================================================

/// Schema augmented with derived per-field metadata, in schema key order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Model {
    pub fields: Vec<FieldModel>,
}

impl Model {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&FieldModel> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
    }

    /// Fields that may appear in the UI
    pub fn visible_fields(&self) -> impl Iterator<Item = &FieldModel> {
        self.fields.iter().filter(|f| !f.hints.hidden)
    }

    /// Required top-level fields that are absent, null or blank in `doc`
    pub fn missing_required(&self, doc: &Value) -> Vec<String> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .filter(|f| match doc.get(&f.name) {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s.trim().is_empty(),
                Some(_) => false,
            })
            .map(|f| f.name.clone())
            .collect()
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self
            .fields
            .iter()
            .map(|field| {
                let marker = if field.required { "*" } else { "" };
                format!("{}{}: {}", field.name, marker, field.type_name())
            })
            .collect();
        write!(f, "{{ {} }}", names.join(", "))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_primitive_type_names() {
        assert_eq!(
            PrimitiveKind::from_type_name("String"),
            Some((PrimitiveKind::String, false))
        );
        assert_eq!(
            PrimitiveKind::from_type_name("text"),
            Some((PrimitiveKind::String, true))
        );
        assert_eq!(
            PrimitiveKind::from_type_name("Integer"),
            Some((PrimitiveKind::Number, false))
        );
        assert_eq!(PrimitiveKind::from_type_name("Mixed"), None);
    }

    #[test]
    fn test_shape_matching() {
        let date = TypeDescriptor::Primitive(PrimitiveKind::Date);
        assert!(date.shape_matches(&json!("2024-01-01T00:00:00Z")));
        assert!(!date.shape_matches(&json!(12)));

        let object = TypeDescriptor::Object(Model::default());
        assert!(object.shape_matches(&json!({})));
        assert!(!object.shape_matches(&json!([])));
    }

    #[test]
    fn test_labels() {
        let field = FieldModel::new("dueDate", TypeDescriptor::Primitive(PrimitiveKind::Date));
        assert_eq!(field.label(), "Due date");

        let field = FieldModel::new("start_time", TypeDescriptor::Primitive(PrimitiveKind::String));
        assert_eq!(field.label(), "Start time");

        let mut field = FieldModel::new("x", TypeDescriptor::Primitive(PrimitiveKind::Number));
        field.hints.label = Some("Score".to_string());
        assert_eq!(field.label(), "Score");
    }

    #[test]
    fn test_missing_required() {
        let mut title = FieldModel::new("title", TypeDescriptor::Primitive(PrimitiveKind::String));
        title.required = true;
        let mut day = FieldModel::new("day", TypeDescriptor::Primitive(PrimitiveKind::Date));
        day.required = true;
        let model = Model {
            fields: vec![title, day, FieldModel::new("notes", TypeDescriptor::Primitive(PrimitiveKind::String))],
        };

        assert_eq!(model.missing_required(&json!({ "title": " ", "notes": "" })), vec!["title", "day"]);
        assert!(model
            .missing_required(&json!({ "title": "Gym", "day": "2024-01-01T00:00:00Z" }))
            .is_empty());
    }

    #[test]
    fn test_model_display() {
        let mut title = FieldModel::new("title", TypeDescriptor::Primitive(PrimitiveKind::String));
        title.required = true;
        let model = Model {
            fields: vec![
                title,
                FieldModel::new("done", TypeDescriptor::Primitive(PrimitiveKind::Boolean)),
            ],
        };
        assert_eq!(model.to_string(), "{ title*: string, done: boolean }");
    }
}
