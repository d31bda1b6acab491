use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use daybook::domain::schemas::SchemaRegistry;
use daybook::persistence::InMemoryDocumentStore;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

fn app() -> Router {
    daybook::create_app(
        Arc::new(InMemoryDocumentStore::new()),
        Arc::new(SchemaRegistry::builtin()),
    )
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().uri(uri).method(method);
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = app();

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["storage"], "ok");

    let (status, body) = send(&app, "GET", "/health/live", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "alive");
}

#[tokio::test]
async fn test_collections_and_schemas() {
    let app = app();

    let (status, body) = send(&app, "GET", "/api/collections", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!(["journal", "todos", "planner"]));

    let (status, body) = send(&app, "GET", "/api/schemas/todos", None).await;
    assert_eq!(status, StatusCode::OK);
    let keys: Vec<&String> = body["data"].as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["title", "notes", "done", "due", "priority", "subtasks"]);

    let (status, body) = send(&app, "GET", "/api/schemas/notes", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_document_lifecycle() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/journal",
        Some(json!({
            "title": "First day",
            "body": "Started the journal.",
            "date": "2024-05-01T00:00:00Z",
            "tags": ["start"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["collection"], "journal");

    let (status, body) = send(&app, "GET", "/api/journal", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/journal/{}", id),
        Some(json!({
            "title": "First day, edited",
            "body": "Started the journal.",
            "date": "2024-05-01T00:00:00Z"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["data"]["title"], "First day, edited");

    let (status, body) = send(&app, "GET", &format!("/api/journal/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["data"]["title"], "First day, edited");

    let (status, body) = send(&app, "DELETE", &format!("/api/journal/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (status, _) = send(&app, "GET", &format!("/api/journal/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_required_fields_rejected() {
    let app = app();

    let (status, body) = send(&app, "POST", "/api/journal", Some(json!({ "title": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Validation failed: missing required fields: title, body, date"
    );

    let (_, body) = send(&app, "GET", "/api/journal", None).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_toggle_todo() {
    let app = app();

    let (_, body) = send(&app, "POST", "/api/todos", Some(json!({ "title": "Water plants", "done": false }))).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "POST", &format!("/api/todos/{}/toggle", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["data"]["done"], true);

    let (_, body) = send(&app, "POST", &format!("/api/todos/{}/toggle", id), None).await;
    assert_eq!(body["data"]["data"]["done"], false);

    let (status, _) = send(&app, "POST", "/api/todos/nope/toggle", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_toggle_requires_done_field() {
    let app = app();

    let (_, body) = send(
        &app,
        "POST",
        "/api/planner",
        Some(json!({ "title": "Standup", "day": "2024-05-01T00:00:00Z" })),
    )
    .await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(&app, "POST", &format!("/api/planner/{}/toggle", id), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_collection_and_missing_document() {
    let app = app();

    let (status, body) = send(&app, "GET", "/api/notes", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Unknown collection: 'notes'");

    let (status, _) = send(&app, "PUT", "/api/todos/missing", Some(json!({ "title": "x" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/api/todos/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_documents_survive_restart() {
    let dir = TempDir::new().unwrap();
    let schemas = Arc::new(SchemaRegistry::builtin());

    let store = Arc::new(InMemoryDocumentStore::open(dir.path()).await.unwrap());
    let app = daybook::create_app(store, schemas.clone());
    let (status, body) = send(&app, "POST", "/api/todos", Some(json!({ "title": "Persist me" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_str().unwrap().to_string();
    drop(app);

    let store = Arc::new(InMemoryDocumentStore::open(dir.path()).await.unwrap());
    let app = daybook::create_app(store, schemas);
    let (status, body) = send(&app, "GET", &format!("/api/todos/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["data"]["title"], "Persist me");
}
