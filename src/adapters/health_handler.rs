use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::{Collection, DocumentPort};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthChecks {
    pub storage: String,
    pub collections: usize,
}

pub struct HealthHandler {
    store: Arc<dyn DocumentPort>,
    start_time: std::time::Instant,
}

impl HealthHandler {
    pub fn new(store: Arc<dyn DocumentPort>) -> Self {
        Self {
            store,
            start_time: std::time::Instant::now(),
        }
    }

    /// Health check - 200 when every collection can be read
    pub async fn health(&self) -> impl IntoResponse {
        let mut storage = "ok".to_string();
        for collection in Collection::ALL {
            if let Err(e) = self.store.list(collection).await {
                tracing::warn!("Health check failed for {}: {}", collection, e);
                storage = format!("error: {}", e);
                break;
            }
        }

        let healthy = storage == "ok";
        let status = HealthStatus {
            status: if healthy { "healthy" } else { "degraded" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            checks: HealthChecks {
                storage,
                collections: Collection::ALL.len(),
            },
        };

        let code = if healthy { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
        (code, Json(status))
    }

    /// Liveness check - returns 200 if server is alive
    pub async fn live(&self) -> impl IntoResponse {
        (StatusCode::OK, Json(serde_json::json!({
            "status": "alive",
            "message": "Server is alive"
        })))
    }
}
