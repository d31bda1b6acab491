//! API client for the Daybook backend

use crate::types::*;
use gloo_net::http::Request;
use serde_json::Value;

const API_BASE: &str = "/api";

// ============================================================================
// Schemas
// ============================================================================

/// Fetch the document schema of a collection
pub async fn get_schema(collection: Collection) -> Result<Value, String> {
    let url = format!("{}/schemas/{}", API_BASE, collection);
    fetch_json::<Value>(&url).await
}

// ============================================================================
// Documents
// ============================================================================

pub async fn list_documents(collection: Collection) -> Result<Vec<Document>, String> {
    let url = format!("{}/{}", API_BASE, collection);
    fetch_json::<Vec<Document>>(&url).await
}

pub async fn create_document(collection: Collection, data: &Value) -> Result<Document, String> {
    let url = format!("{}/{}", API_BASE, collection);
    post_json::<Value, Document>(&url, data).await
}

pub async fn update_document(collection: Collection, id: &str, data: &Value) -> Result<Document, String> {
    let url = format!("{}/{}/{}", API_BASE, collection, urlencoding::encode(id));
    put_json::<Value, Document>(&url, data).await
}

pub async fn delete_document(collection: Collection, id: &str) -> Result<(), String> {
    let url = format!("{}/{}/{}", API_BASE, collection, urlencoding::encode(id));
    delete_request(&url).await
}

/// Flip the `done` flag of a document
pub async fn toggle_document(collection: Collection, id: &str) -> Result<Document, String> {
    let url = format!("{}/{}/{}/toggle", API_BASE, collection, urlencoding::encode(id));
    post_json::<Value, Document>(&url, &Value::Null).await
}

// ============================================================================
// Helpers
// ============================================================================

fn unwrap_response<T>(api_response: ApiResponse<T>) -> Result<T, String> {
    if api_response.success {
        api_response.data.ok_or_else(|| "No data in response".to_string())
    } else {
        Err(api_response.error.unwrap_or_else(|| "Unknown error".to_string()))
    }
}

async fn fetch_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, String> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    let api_response: ApiResponse<T> = response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;

    unwrap_response(api_response)
}

async fn post_json<T: serde::Serialize, R: serde::de::DeserializeOwned>(
    url: &str,
    body: &T,
) -> Result<R, String> {
    let response = Request::post(url)
        .json(body)
        .map_err(|e| format!("Failed to serialize body: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    let api_response: ApiResponse<R> = response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;

    unwrap_response(api_response)
}

async fn put_json<T: serde::Serialize, R: serde::de::DeserializeOwned>(
    url: &str,
    body: &T,
) -> Result<R, String> {
    let response = Request::put(url)
        .json(body)
        .map_err(|e| format!("Failed to serialize body: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    let api_response: ApiResponse<R> = response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;

    unwrap_response(api_response)
}

async fn delete_request(url: &str) -> Result<(), String> {
    let response = Request::delete(url)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    let api_response: ApiResponse<Value> = response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;

    if api_response.success {
        Ok(())
    } else {
        Err(api_response.error.unwrap_or_else(|| "Unknown error".to_string()))
    }
}
