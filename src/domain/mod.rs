use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::persistence::StoreError;

pub mod schemas;
pub mod validation;

/// Document collections served by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
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
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| StoreError::UnknownCollection(s.to_string()))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub collection: Collection,
    /// Schema-shaped JSON object
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[async_trait]
pub trait DocumentPort: Send + Sync {
    /// Newest first
    async fn list(&self, collection: Collection) -> Result<Vec<Document>, StoreError>;
    async fn get(&self, collection: Collection, id: &str) -> Result<Document, StoreError>;
    async fn create(&self, collection: Collection, data: Value) -> Result<Document, StoreError>;
    /// Replace the data of an existing document
    async fn update(&self, collection: Collection, id: &str, data: Value) -> Result<Document, StoreError>;
    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_round_trip() {
        for collection in Collection::ALL {
            assert_eq!(collection.as_str().parse::<Collection>().unwrap(), collection);
        }
        assert!(matches!(
            "Todos".parse::<Collection>(),
            Err(StoreError::UnknownCollection(name)) if name == "Todos"
        ));
        assert_eq!(serde_json::to_string(&Collection::Planner).unwrap(), "\"planner\"");
    }
}
