//! Built-in collection schemas
//!
//! Schemas use a Mongoose-like layout: each key maps to a type name, an
//! options object (`type`, `required`, `default`, `enum`, `ref`, ...), a list
//! holding the item descriptor, or a nested schema. Key order is display order.

use serde_json::{json, Value};
use std::collections::BTreeMap;
use tracing::info;

use super::Collection;
use crate::persistence::StoreError;

pub fn builtin_schema(collection: Collection) -> Value {
    match collection {
        Collection::Journal => json!({
            "title": { "type": "String", "required": true },
            "body": { "type": "Text", "required": true, "placeholder": "What happened today?" },
            "mood": { "type": "String", "enum": ["great", "good", "okay", "bad"] },
            "date": { "type": "Date", "required": true },
            "tags": ["String"],
            "location": {
                "place": "String",
                "weather": "String"
            }
        }),
        Collection::Todos => json!({
            "title": { "type": "String", "required": true },
            "notes": "Text",
            "done": { "type": "Boolean", "default": false },
            "due": "Date",
            "priority": { "type": "String", "enum": ["low", "medium", "high"], "default": "medium" },
            "subtasks": [{
                "title": { "type": "String", "required": true },
                "done": "Boolean"
            }]
        }),
        Collection::Planner => json!({
            "title": { "type": "String", "required": true },
            "day": { "type": "Date", "required": true },
            "start": { "type": "String", "placeholder": "09:00" },
            "end": { "type": "String", "placeholder": "09:00" },
            "todo": { "type": "ObjectId", "ref": "todos", "label": "Linked todo" },
            "notes": "Text"
        }),
    }
}

/// Schema per collection, built-ins unless overridden
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    schemas: BTreeMap<Collection, Value>,
}

impl SchemaRegistry {
    pub fn builtin() -> Self {
        Self {
            schemas: Collection::ALL
                .into_iter()
                .map(|c| (c, builtin_schema(c)))
                .collect(),
        }
    }

    /// Built-ins with the given collection schemas swapped in
    pub fn with_overrides(overrides: &BTreeMap<String, Value>) -> Result<Self, StoreError> {
        let mut registry = Self::builtin();
        for (name, schema) in overrides {
            let collection: Collection = name.parse()?;
            if !schema.is_object() {
                return Err(StoreError::Validation(format!(
                    "schema override for '{}' must be an object",
                    name
                )));
            }
            info!("Using schema override for collection '{}'", collection);
            registry.schemas.insert(collection, schema.clone());
        }
        Ok(registry)
    }

    pub fn get(&self, collection: Collection) -> &Value {
        // Every collection is seeded in `builtin`
        &self.schemas[&collection]
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_key_order() {
        let schema = builtin_schema(Collection::Todos);
        let keys: Vec<&str> = schema.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["title", "notes", "done", "due", "priority", "subtasks"]);
    }

    #[test]
    fn test_planner_references_todos() {
        let schema = builtin_schema(Collection::Planner);
        assert_eq!(schema["todo"]["ref"], "todos");
    }

    #[test]
    fn test_overrides() {
        let mut overrides = BTreeMap::new();
        overrides.insert("journal".to_string(), json!({ "title": "String" }));
        let registry = SchemaRegistry::with_overrides(&overrides).unwrap();
        assert_eq!(registry.get(Collection::Journal), &json!({ "title": "String" }));
        assert_eq!(registry.get(Collection::Todos), &builtin_schema(Collection::Todos));

        overrides.insert("notes".to_string(), json!({}));
        assert!(matches!(
            SchemaRegistry::with_overrides(&overrides),
            Err(StoreError::UnknownCollection(_))
        ));
    }
}
