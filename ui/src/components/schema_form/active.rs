//! Active-field tracking
//!
//! Decides which top-level fields a form shows. Required fields start
//! active; optional ones are switched on from the field picker.

use serde_json::Value;
use std::collections::BTreeSet;

use super::types::{FieldModel, Model};

/// Set of field names currently shown
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActiveFields {
    names: BTreeSet<String>,
}

impl ActiveFields {
    /// Required fields, or every field when `show_all` is set
    pub fn seeded(model: &Model, show_all: bool) -> Self {
        let names = if show_all {
            model.field_names().map(String::from).collect()
        } else {
            model.required_fields().map(String::from).collect()
        };
        Self { names }
    }

    /// Also activate optional fields that already hold data in `doc`
    pub fn with_populated(mut self, model: &Model, doc: &Value) -> Self {
        for field in &model.fields {
            let populated = doc
                .get(&field.name)
                .is_some_and(|value| has_content(field, value));
            if populated {
                self.names.insert(field.name.clone());
            }
        }
        self
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Add `name` if absent, remove it if present. Returns the new membership.
    pub fn toggle(&mut self, name: &str) -> bool {
        if self.names.remove(name) {
            false
        } else {
            self.names.insert(name.to_string());
            true
        }
    }

    pub fn select_all(&mut self, model: &Model) {
        self.names = model.field_names().map(String::from).collect();
    }

    /// Deselect everything except the required fields
    pub fn select_none(&mut self, model: &Model) {
        self.names = model.required_fields().map(String::from).collect();
    }

    pub fn all_selected(&self, model: &Model) -> bool {
        model.field_names().all(|name| self.names.contains(name))
    }

    /// Active, non-hidden fields in model order. Names unknown to the model
    /// are skipped.
    pub fn visible<'m>(&'m self, model: &'m Model) -> impl Iterator<Item = &'m FieldModel> + 'm {
        model
            .visible_fields()
            .filter(move |field| self.names.contains(&field.name))
    }
}

/// A value counts as content unless it equals what an untouched field holds
fn has_content(field: &FieldModel, value: &Value) -> bool {
    if field.default.as_ref() == Some(value) {
        return false;
    }
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => map.values().any(|v| !v.is_null() && v.as_str() != Some("")),
        Value::Number(_) => true,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::schema_form::model::derive_model;
    use serde_json::json;

    fn model() -> Model {
        derive_model(&json!({
            "title": { "type": "String", "required": true },
            "body": { "type": "Text", "required": true },
            "mood": "String",
            "tags": ["String"],
            "secret": { "type": "String", "hidden": true }
        }))
    }

    fn names(active: &ActiveFields, model: &Model) -> Vec<String> {
        active.visible(model).map(|f| f.name.clone()).collect()
    }

    #[test]
    fn test_seed_from_required_fields() {
        let model = model();
        let active = ActiveFields::seeded(&model, false);
        assert_eq!(names(&active, &model), vec!["title", "body"]);
    }

    #[test]
    fn test_seed_show_all() {
        let model = model();
        let active = ActiveFields::seeded(&model, true);
        assert!(active.all_selected(&model));
        // hidden fields are active but never visible
        assert_eq!(names(&active, &model), vec!["title", "body", "mood", "tags"]);
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let model = model();
        let original = ActiveFields::seeded(&model, false);

        for name in ["title", "mood", "unknown"] {
            let mut active = original.clone();
            let first = active.toggle(name);
            let second = active.toggle(name);
            assert_ne!(first, second);
            assert_eq!(active, original, "toggling {}", name);
        }
    }

    #[test]
    fn test_select_all_then_none_keeps_required() {
        let model = model();
        let mut active = ActiveFields::seeded(&model, false);
        active.toggle("mood");
        active.toggle("title");

        active.select_all(&model);
        assert_eq!(active.len(), 5);

        active.select_none(&model);
        assert!(active.is_active("title"));
        assert!(active.is_active("body"));
        assert!(!active.is_active("mood"));
        assert_eq!(active.len(), 2);
    }

    #[test]
    fn test_unknown_names_are_not_rendered() {
        let model = model();
        let mut active = ActiveFields::default();
        active.toggle("ghost");
        active.toggle("mood");
        assert_eq!(names(&active, &model), vec!["mood"]);
    }

    #[test]
    fn test_with_populated_activates_filled_fields() {
        let model = model();
        let doc = json!({ "title": "", "mood": "good", "tags": [] });
        let active = ActiveFields::seeded(&model, false).with_populated(&model, &doc);
        assert!(active.is_active("mood"));
        assert!(!active.is_active("tags"));
        assert!(active.is_active("title"));
    }
}
