//! # Daybook
//!
//! A small personal organizer: journal entries, todos and day plans stored as
//! schema-described JSON documents and served to a Leptos Web UI.
//!
//! ## Architecture
//!
//! - **Domain**: collections, documents, schemas and validation
//! - **Persistence**: the document store and its errors
//! - **Adapters**: HTTP handlers (REST API, health, embedded UI)
//! - **Config**: layered settings and schema overrides

pub mod adapters;
pub mod config;
pub mod domain;
pub mod persistence;

use crate::adapters::api_handler::{self, ApiState};
use crate::adapters::health_handler::HealthHandler;
use crate::domain::schemas::SchemaRegistry;
use crate::domain::DocumentPort;
use axum::{routing::{get, post}, Router};
use std::sync::Arc;

/// Creates the Axum application router with all endpoints configured.
pub fn create_app(store: Arc<dyn DocumentPort>, schemas: Arc<SchemaRegistry>) -> Router {
    let health_handler = Arc::new(HealthHandler::new(store.clone()));

    let health_router = Router::new()
        .route("/health", get({
            let handler = health_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.health().await }
            }
        }))
        .route("/health/live", get({
            let handler = health_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.live().await }
            }
        }));

    let api_state = ApiState { store, schemas };

    // API routes for Web UI
    let api_router = Router::new()
        .route("/collections", get(api_handler::list_collections))
        .route("/schemas/:collection", get(api_handler::get_schema))
        // Documents CRUD
        .route("/:collection", get(api_handler::list_documents).post(api_handler::create_document))
        .route(
            "/:collection/:id",
            get(api_handler::get_document)
                .put(api_handler::update_document)
                .delete(api_handler::delete_document),
        )
        .route("/:collection/:id/toggle", post(api_handler::toggle_document))
        .with_state(api_state);

    health_router
        .nest("/api", api_router)
        // UI endpoint (catch-all for SPA)
        .fallback(crate::adapters::ui_handler::UIHandler::serve)
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
}
