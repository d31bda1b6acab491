//! REST API handlers for the Web UI
//!
//! Provides schema lookup and CRUD endpoints for journal, todo and planner
//! documents.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, warn};

use crate::domain::schemas::SchemaRegistry;
use crate::domain::validation::validate_document;
use crate::domain::{Collection, Document, DocumentPort};
use crate::persistence::StoreError;

/// Shared application state for API handlers
#[derive(Clone)]
pub struct ApiState {
    pub store: Arc<dyn DocumentPort>,
    pub schemas: Arc<SchemaRegistry>,
}

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

impl ApiResponse<()> {
    pub fn ok() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }
}

type ApiResult<T> = (StatusCode, Json<ApiResponse<T>>);

/// Map a store result onto the response envelope
fn respond<T: Serialize>(ok_status: StatusCode, result: Result<T, StoreError>) -> ApiResult<T> {
    match result {
        Ok(data) => (ok_status, Json(ApiResponse::success(data))),
        Err(e) => {
            let status = e.status_code();
            if status.is_server_error() {
                error!("Request failed: {}", e);
            } else {
                warn!("Request rejected: {}", e);
            }
            (status, Json(ApiResponse::error(e.to_string())))
        }
    }
}

// ============================================================================
// Collections & Schemas
// ============================================================================

/// GET /api/collections - Names of the served collections
pub async fn list_collections() -> impl IntoResponse {
    let names: Vec<&str> = Collection::ALL.iter().map(Collection::as_str).collect();
    (StatusCode::OK, Json(ApiResponse::success(names)))
}

/// GET /api/schemas/:collection - Schema used to render and validate documents
pub async fn get_schema(
    State(state): State<ApiState>,
    Path(collection): Path<String>,
) -> impl IntoResponse {
    let result = collection
        .parse::<Collection>()
        .map(|c| state.schemas.get(c).clone());
    respond(StatusCode::OK, result)
}

// ============================================================================
// Documents CRUD
// ============================================================================

/// GET /api/:collection - List documents, newest first
pub async fn list_documents(
    State(state): State<ApiState>,
    Path(collection): Path<String>,
) -> impl IntoResponse {
    let result = async {
        let collection: Collection = collection.parse()?;
        state.store.list(collection).await
    }
    .await;
    respond(StatusCode::OK, result)
}

/// GET /api/:collection/:id - Get a single document
pub async fn get_document(
    State(state): State<ApiState>,
    Path((collection, id)): Path<(String, String)>,
) -> impl IntoResponse {
    let result = async {
        let collection: Collection = collection.parse()?;
        state.store.get(collection, &id).await
    }
    .await;
    respond(StatusCode::OK, result)
}

/// POST /api/:collection - Create a document from its data object
pub async fn create_document(
    State(state): State<ApiState>,
    Path(collection): Path<String>,
    Json(data): Json<Value>,
) -> impl IntoResponse {
    let result = async {
        let collection: Collection = collection.parse()?;
        validate_document(state.schemas.get(collection), &data)?;
        state.store.create(collection, data).await
    }
    .await;
    respond(StatusCode::CREATED, result)
}

/// PUT /api/:collection/:id - Replace a document's data
pub async fn update_document(
    State(state): State<ApiState>,
    Path((collection, id)): Path<(String, String)>,
    Json(data): Json<Value>,
) -> impl IntoResponse {
    let result = async {
        let collection: Collection = collection.parse()?;
        validate_document(state.schemas.get(collection), &data)?;
        state.store.update(collection, &id, data).await
    }
    .await;
    respond(StatusCode::OK, result)
}

/// DELETE /api/:collection/:id - Delete a document
pub async fn delete_document(
    State(state): State<ApiState>,
    Path((collection, id)): Path<(String, String)>,
) -> impl IntoResponse {
    let result = async {
        let collection: Collection = collection.parse()?;
        state.store.delete(collection, &id).await
    }
    .await;

    match result {
        Ok(()) => (StatusCode::OK, Json(ApiResponse::ok())),
        Err(e) => respond(StatusCode::OK, Err::<(), _>(e)),
    }
}

/// POST /api/:collection/:id/toggle - Flip the `done` flag
pub async fn toggle_document(
    State(state): State<ApiState>,
    Path((collection, id)): Path<(String, String)>,
) -> impl IntoResponse {
    let result = async {
        let collection: Collection = collection.parse()?;
        if state.schemas.get(collection).get("done").is_none() {
            return Err(StoreError::Validation(format!(
                "{} documents have no 'done' field",
                collection
            )));
        }
        let doc = state.store.get(collection, &id).await?;
        let data = toggled(doc)?;
        state.store.update(collection, &id, data).await
    }
    .await;
    respond(StatusCode::OK, result)
}

/// Document data with `done` negated (missing counts as false)
fn toggled(doc: Document) -> Result<Value, StoreError> {
    let mut data = doc.data;
    let map = data
        .as_object_mut()
        .ok_or_else(|| StoreError::Validation("document data must be a JSON object".to_string()))?;
    let done = map.get("done").and_then(Value::as_bool).unwrap_or(false);
    map.insert("done".to_string(), Value::Bool(!done));
    Ok(data)
}
