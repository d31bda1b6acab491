//! In-memory document store with optional JSON-file persistence

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::domain::{Collection, Document, DocumentPort};
use crate::persistence::error::StoreError;

type CollectionMap = HashMap<String, Document>;

/// Document store keeping every collection in memory.
///
/// With a data directory, each collection is mirrored to
/// `<data_dir>/<collection>.json` after every mutation and read back on open.
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<Collection, CollectionMap>>,
    data_dir: Option<PathBuf>,
}

impl InMemoryDocumentStore {
    /// Store without persistence
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(empty_collections()),
            data_dir: None,
        }
    }

    /// Store backed by `data_dir`; missing files mean empty collections
    pub async fn open(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        tokio::fs::create_dir_all(&data_dir).await?;

        let mut collections = empty_collections();
        for collection in Collection::ALL {
            let path = collection_file(&data_dir, collection);
            if !tokio::fs::try_exists(&path).await? {
                continue;
            }
            let content = tokio::fs::read_to_string(&path).await?;
            let docs: Vec<Document> = serde_json::from_str(&content)?;
            info!("Loaded {} documents from {}", docs.len(), path.display());
            collections.insert(
                collection,
                docs.into_iter().map(|d| (d.id.clone(), d)).collect(),
            );
        }

        Ok(Self {
            collections: RwLock::new(collections),
            data_dir: Some(data_dir),
        })
    }

    /// Write one collection to disk (no-op without a data directory).
    /// Mutations call this on a copy and only swap it in once it succeeds.
    async fn persist(&self, collection: Collection, docs: &CollectionMap) -> Result<(), StoreError> {
        let Some(dir) = &self.data_dir else {
            return Ok(());
        };
        let path = collection_file(dir, collection);
        let tmp = path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(&sorted(docs))?;
        tokio::fs::write(&tmp, content).await?;
        tokio::fs::rename(&tmp, &path).await?;
        debug!("Persisted {} documents to {}", docs.len(), path.display());
        Ok(())
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

fn empty_collections() -> HashMap<Collection, CollectionMap> {
    Collection::ALL.into_iter().map(|c| (c, HashMap::new())).collect()
}

fn collection_file(dir: &Path, collection: Collection) -> PathBuf {
    dir.join(format!("{}.json", collection))
}

/// Newest first; ties broken by id for a stable order
fn sorted(docs: &CollectionMap) -> Vec<Document> {
    let mut list: Vec<Document> = docs.values().cloned().collect();
    list.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
    list
}

fn not_found(collection: Collection, id: &str) -> StoreError {
    StoreError::NotFound {
        collection: collection.to_string(),
        id: id.to_string(),
    }
}

#[async_trait]
impl DocumentPort for InMemoryDocumentStore {
    async fn list(&self, collection: Collection) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections.get(&collection).map(sorted).unwrap_or_default())
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Document, StoreError> {
        let collections = self.collections.read().await;
        collections
            .get(&collection)
            .and_then(|docs| docs.get(id))
            .cloned()
            .ok_or_else(|| not_found(collection, id))
    }

    async fn create(&self, collection: Collection, data: Value) -> Result<Document, StoreError> {
        let now = Utc::now();
        let doc = Document {
            id: uuid::Uuid::new_v4().to_string(),
            collection,
            data,
            created_at: now,
            updated_at: now,
        };

        let mut collections = self.collections.write().await;
        let mut docs = collections.get(&collection).cloned().unwrap_or_default();
        docs.insert(doc.id.clone(), doc.clone());
        self.persist(collection, &docs).await?;
        collections.insert(collection, docs);

        info!("Created {} document {}", collection, doc.id);
        Ok(doc)
    }

    async fn update(&self, collection: Collection, id: &str, data: Value) -> Result<Document, StoreError> {
        let mut collections = self.collections.write().await;
        let mut docs = collections.get(&collection).cloned().unwrap_or_default();
        let doc = docs.get_mut(id).ok_or_else(|| not_found(collection, id))?;
        doc.data = data;
        doc.updated_at = Utc::now();
        let updated = doc.clone();
        self.persist(collection, &docs).await?;
        collections.insert(collection, docs);

        debug!("Updated {} document {}", collection, id);
        Ok(updated)
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let mut docs = collections.get(&collection).cloned().unwrap_or_default();
        if docs.remove(id).is_none() {
            return Err(not_found(collection, id));
        }
        self.persist(collection, &docs).await?;
        collections.insert(collection, docs);

        info!("Deleted {} document {}", collection, id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_crud_cycle() {
        let store = InMemoryDocumentStore::new();

        let doc = store
            .create(Collection::Todos, json!({ "title": "Buy milk" }))
            .await
            .unwrap();
        assert_eq!(doc.created_at, doc.updated_at);

        let fetched = store.get(Collection::Todos, &doc.id).await.unwrap();
        assert_eq!(fetched, doc);

        let updated = store
            .update(Collection::Todos, &doc.id, json!({ "title": "Buy oat milk" }))
            .await
            .unwrap();
        assert_eq!(updated.data["title"], "Buy oat milk");
        assert!(updated.updated_at >= doc.updated_at);
        assert_eq!(updated.created_at, doc.created_at);

        store.delete(Collection::Todos, &doc.id).await.unwrap();
        assert!(matches!(
            store.get(Collection::Todos, &doc.id).await,
            Err(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let store = InMemoryDocumentStore::new();
        let doc = store.create(Collection::Journal, json!({})).await.unwrap();

        assert!(store.get(Collection::Planner, &doc.id).await.is_err());
        assert!(store.list(Collection::Planner).await.unwrap().is_empty());
        assert!(matches!(
            store.delete(Collection::Todos, &doc.id).await,
            Err(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let store = InMemoryDocumentStore::new();
        let first = store.create(Collection::Journal, json!({ "n": 1 })).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = store.create(Collection::Journal, json!({ "n": 2 })).await.unwrap();

        let ids: Vec<String> = store
            .list(Collection::Journal)
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_persists_across_reopen() {
        let dir = TempDir::new().unwrap();

        let store = InMemoryDocumentStore::open(dir.path()).await.unwrap();
        let doc = store
            .create(Collection::Planner, json!({ "title": "Standup", "day": "2024-01-01T00:00:00Z" }))
            .await
            .unwrap();
        assert!(dir.path().join("planner.json").exists());
        drop(store);

        let reopened = InMemoryDocumentStore::open(dir.path()).await.unwrap();
        assert_eq!(reopened.get(Collection::Planner, &doc.id).await.unwrap(), doc);
        assert!(reopened.list(Collection::Todos).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("todos.json"), "not json").unwrap();

        assert!(matches!(
            InMemoryDocumentStore::open(dir.path()).await,
            Err(StoreError::Json(_))
        ));
    }

    #[tokio::test]
    async fn test_failed_write_leaves_memory_unchanged() {
        let dir = TempDir::new().unwrap();
        let store = InMemoryDocumentStore::open(dir.path()).await.unwrap();
        let kept = store.create(Collection::Todos, json!({ "title": "kept" })).await.unwrap();

        // A non-empty directory where the collection file goes makes the rename fail
        let target = dir.path().join("todos.json");
        std::fs::remove_file(&target).unwrap();
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("blocker"), "x").unwrap();

        assert!(store.create(Collection::Todos, json!({ "title": "x" })).await.is_err());
        assert!(store
            .update(Collection::Todos, &kept.id, json!({ "title": "changed" }))
            .await
            .is_err());
        assert!(store.delete(Collection::Todos, &kept.id).await.is_err());

        let docs = store.list(Collection::Todos).await.unwrap();
        assert_eq!(docs, vec![kept]);
    }
}
