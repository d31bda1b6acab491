//! Document persistence layer
//!
//! - `InMemoryDocumentStore`: the `DocumentPort` implementation, optionally
//!   mirrored to one JSON file per collection
//! - `StoreError`: error type shared by the store, validation and the API

pub mod error;
pub mod repository;

pub use error::StoreError;
pub use repository::InMemoryDocumentStore;

use std::sync::Arc;
use tracing::info;

use crate::config::Settings;
use crate::domain::DocumentPort;

/// Build the store described by the storage settings
pub async fn create_document_store(settings: &Settings) -> Result<Arc<dyn DocumentPort>, StoreError> {
    match &settings.storage.data_dir {
        Some(dir) => {
            info!("Persisting documents under {}", dir.display());
            Ok(Arc::new(InMemoryDocumentStore::open(dir).await?))
        }
        None => {
            info!("No data directory configured; documents are kept in memory only");
            Ok(Arc::new(InMemoryDocumentStore::new()))
        }
    }
}
