//! Shared types for the Daybook web UI
//!
//! These types mirror the backend API response structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Generic API response wrapper
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

/// Document collections served by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Journal,
    Todos,
    Planner,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Collection::Journal, Collection::Todos, Collection::Planner];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Journal => "journal",
            Collection::Todos => "todos",
            Collection::Planner => "planner",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }

    /// Singular noun for buttons and headings
    pub fn item_noun(&self) -> &'static str {
        match self {
            Collection::Journal => "entry",
            Collection::Todos => "todo",
            Collection::Planner => "plan",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored document
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Document {
    pub id: String,
    pub collection: Collection,
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// String field from the document data
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.data.get(name).and_then(Value::as_str)
    }

    /// Timestamp field (RFC 3339) from the document data
    pub fn field_date(&self, name: &str) -> Option<DateTime<Utc>> {
        self.field_str(name)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    pub fn field_bool(&self, name: &str) -> bool {
        self.data.get(name).and_then(Value::as_bool).unwrap_or(false)
    }

    /// Title for lists and reference pickers
    pub fn title(&self) -> String {
        match self.field_str("title") {
            Some(title) if !title.trim().is_empty() => title.to_string(),
            _ => "(untitled)".to_string(),
        }
    }

    /// Documents created optimistically carry a local id until the server answers
    pub fn is_pending(&self) -> bool {
        self.id.starts_with(PENDING_PREFIX)
    }
}

pub const PENDING_PREFIX: &str = "pending-";

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collection_names() {
        for collection in Collection::ALL {
            assert_eq!(Collection::parse(collection.as_str()), Some(collection));
        }
        assert_eq!(Collection::parse("projects"), None);
        assert_eq!(serde_json::to_value(Collection::Todos).unwrap(), json!("todos"));
    }

    #[test]
    fn test_document_title() {
        let doc: Document = serde_json::from_value(json!({
            "id": "1",
            "collection": "journal",
            "data": { "title": "  " },
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(doc.title(), "(untitled)");
        assert!(!doc.is_pending());
        assert!(doc.field_date("title").is_none());
    }

    #[test]
    fn test_optimistic_documents_are_pending() {
        let doc: Document = serde_json::from_value(json!({
            "id": format!("{}1700000000", PENDING_PREFIX),
            "collection": "planner",
            "data": {},
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        assert!(doc.is_pending());
    }
}
