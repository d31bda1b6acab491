//! Client-side document store
//!
//! Holds the documents of one collection in a signal. Mutations are applied
//! optimistically and rolled back if the backend rejects them.

use chrono::Utc;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;
use serde_json::Value;

use crate::api;
use crate::types::{Collection, Document, PENDING_PREFIX};

// ============================================================================
// Pure list operations
// ============================================================================

/// Replace the document with the same id, or insert it at the front
pub fn apply_upsert(docs: &mut Vec<Document>, doc: Document) {
    match docs.iter_mut().find(|d| d.id == doc.id) {
        Some(slot) => *slot = doc,
        None => docs.insert(0, doc),
    }
}

/// Swap a pending placeholder for the stored document
pub fn apply_replace(docs: &mut Vec<Document>, old_id: &str, doc: Document) {
    docs.retain(|d| d.id != doc.id || d.id == old_id);
    match docs.iter_mut().find(|d| d.id == old_id) {
        Some(slot) => *slot = doc,
        None => docs.insert(0, doc),
    }
}

pub fn apply_remove(docs: &mut Vec<Document>, id: &str) -> Option<Document> {
    let idx = docs.iter().position(|d| d.id == id)?;
    Some(docs.remove(idx))
}

/// Put back the saved version of a document that is still listed.
/// A document removed in the meantime stays removed.
pub fn apply_revert(docs: &mut [Document], previous: Document) -> bool {
    match docs.iter_mut().find(|d| d.id == previous.id) {
        Some(slot) => {
            *slot = previous;
            true
        }
        None => false,
    }
}

/// Re-insert a removed document near its old position, unless it is back already
pub fn apply_reinsert(docs: &mut Vec<Document>, index: usize, doc: Document) {
    if docs.iter().any(|d| d.id == doc.id) {
        return;
    }
    docs.insert(index.min(docs.len()), doc);
}

/// Flip a boolean field; returns false when the document is unknown
pub fn apply_toggle(docs: &mut [Document], id: &str, field: &str) -> bool {
    let Some(doc) = docs.iter_mut().find(|d| d.id == id) else {
        return false;
    };
    let current = doc.field_bool(field);
    match doc.data.as_object_mut() {
        Some(map) => {
            map.insert(field.to_string(), Value::Bool(!current));
            true
        }
        None => false,
    }
}

// ============================================================================
// Reactive store
// ============================================================================

#[derive(Clone, Copy)]
pub struct DocumentStore {
    pub collection: Collection,
    pub documents: RwSignal<Vec<Document>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl DocumentStore {
    pub fn new(collection: Collection) -> Self {
        let store = Self {
            collection,
            documents: RwSignal::new(Vec::new()),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
        };
        store.reload();
        store
    }

    pub fn reload(&self) {
        let store = *self;
        store.loading.set(true);
        spawn_local(async move {
            match api::list_documents(store.collection).await {
                Ok(docs) => {
                    store.documents.set(docs);
                    store.error.set(None);
                }
                Err(e) => {
                    log::error!("Failed to load {}: {}", store.collection, e);
                    store.error.set(Some(e));
                }
            }
            store.loading.set(false);
        });
    }

    pub fn create(&self, data: Value) {
        let store = *self;
        let now = Utc::now();
        let pending_id = format!("{}{}", PENDING_PREFIX, now.timestamp_micros());

        store.documents.update(|docs| {
            apply_upsert(
                docs,
                Document {
                    id: pending_id.clone(),
                    collection: store.collection,
                    data: data.clone(),
                    created_at: now,
                    updated_at: now,
                },
            )
        });

        spawn_local(async move {
            match api::create_document(store.collection, &data).await {
                Ok(doc) => store.documents.update(|docs| apply_replace(docs, &pending_id, doc)),
                Err(e) => {
                    store.documents.update(|docs| {
                        apply_remove(docs, &pending_id);
                    });
                    store.report("create", e);
                }
            }
        });
    }

    pub fn update(&self, id: String, data: Value) {
        let store = *self;
        let previous = store.find_untracked(&id);

        store.documents.update(|docs| {
            if let Some(doc) = docs.iter_mut().find(|d| d.id == id) {
                doc.data = data.clone();
                doc.updated_at = Utc::now();
            }
        });

        spawn_local(async move {
            match api::update_document(store.collection, &id, &data).await {
                Ok(doc) => store.documents.update(|docs| apply_upsert(docs, doc)),
                Err(e) => store.revert(previous, "update", e),
            }
        });
    }

    pub fn remove(&self, id: String) {
        let store = *self;
        let removed = store.documents.try_update(|docs| {
            let index = docs.iter().position(|d| d.id == id)?;
            Some((index, docs.remove(index)))
        }).flatten();

        spawn_local(async move {
            if let Err(e) = api::delete_document(store.collection, &id).await {
                if let Some((index, doc)) = removed {
                    store.documents.update(|docs| apply_reinsert(docs, index, doc));
                }
                store.report("delete", e);
            }
        });
    }

    /// Flip the `done` flag
    pub fn toggle_done(&self, id: String) {
        let store = *self;
        let previous = store.find_untracked(&id);
        store.documents.update(|docs| {
            apply_toggle(docs, &id, "done");
        });

        spawn_local(async move {
            match api::toggle_document(store.collection, &id).await {
                Ok(doc) => store.documents.update(|docs| apply_upsert(docs, doc)),
                Err(e) => store.revert(previous, "toggle", e),
            }
        });
    }

    fn find_untracked(&self, id: &str) -> Option<Document> {
        self.documents
            .with_untracked(|docs| docs.iter().find(|d| d.id == id).cloned())
    }

    /// Undo an optimistic edit of one document
    fn revert(&self, previous: Option<Document>, action: &str, error: String) {
        if let Some(doc) = previous {
            self.documents.update(|docs| {
                apply_revert(docs, doc);
            });
        }
        self.report(action, error);
    }

    fn report(&self, action: &str, error: String) {
        log::error!("Failed to {} {} document: {}", action, self.collection.item_noun(), error);
        self.error.set(Some(error));
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(id: &str, data: Value) -> Document {
        let now = Utc::now();
        Document {
            id: id.to_string(),
            collection: Collection::Todos,
            data,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_upsert_replaces_or_prepends() {
        let mut docs = vec![doc("a", json!({ "title": "A" }))];
        apply_upsert(&mut docs, doc("b", json!({ "title": "B" })));
        assert_eq!(docs.iter().map(|d| d.id.as_str()).collect::<Vec<_>>(), vec!["b", "a"]);

        apply_upsert(&mut docs, doc("a", json!({ "title": "A2" })));
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[1].title(), "A2");
    }

    #[test]
    fn test_replace_pending_document() {
        let mut docs = vec![doc("pending-1", json!({})), doc("x", json!({}))];
        apply_replace(&mut docs, "pending-1", doc("real", json!({ "title": "T" })));
        assert_eq!(docs.iter().map(|d| d.id.as_str()).collect::<Vec<_>>(), vec!["real", "x"]);

        // a reload may already have delivered the stored document
        let mut docs = vec![doc("pending-1", json!({})), doc("real", json!({}))];
        apply_replace(&mut docs, "pending-1", doc("real", json!({ "title": "T" })));
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].title(), "T");
    }

    #[test]
    fn test_remove() {
        let mut docs = vec![doc("a", json!({})), doc("b", json!({}))];
        assert_eq!(apply_remove(&mut docs, "a").map(|d| d.id), Some("a".to_string()));
        assert!(apply_remove(&mut docs, "zzz").is_none());
        assert_eq!(docs.len(), 1);
    }

    #[test]
    fn test_failed_delete_keeps_created_document() {
        // create in flight, delete of "a" starts
        let mut docs = vec![doc("pending-1", json!({ "title": "new" })), doc("a", json!({}))];
        let (index, removed) = (1, apply_remove(&mut docs, "a").unwrap());

        // create resolves before the delete fails
        apply_replace(&mut docs, "pending-1", doc("real", json!({ "title": "new" })));
        apply_reinsert(&mut docs, index, removed);

        assert_eq!(docs.iter().map(|d| d.id.as_str()).collect::<Vec<_>>(), vec!["real", "a"]);

        // already reloaded: no duplicate
        apply_reinsert(&mut docs, 0, doc("a", json!({})));
        assert_eq!(docs.len(), 2);
    }

    #[test]
    fn test_revert_touches_only_that_document() {
        let before = doc("a", json!({ "title": "A" }));
        let mut docs = vec![doc("a", json!({ "title": "A edited" })), doc("b", json!({ "title": "B" }))];
        apply_upsert(&mut docs, doc("c", json!({ "title": "C" })));

        assert!(apply_revert(&mut docs, before));
        assert_eq!(
            docs.iter().map(|d| d.title()).collect::<Vec<_>>(),
            vec!["C", "A", "B"]
        );

        // deleted meanwhile: not resurrected
        assert!(!apply_revert(&mut docs, doc("gone", json!({}))));
        assert_eq!(docs.len(), 3);
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut docs = vec![doc("a", json!({ "title": "A" }))];
        assert!(apply_toggle(&mut docs, "a", "done"));
        assert!(docs[0].field_bool("done"));
        assert!(apply_toggle(&mut docs, "a", "done"));
        assert!(!docs[0].field_bool("done"));
        assert!(!apply_toggle(&mut docs, "missing", "done"));
    }
}
