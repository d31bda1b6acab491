//! Serves the compiled Web UI bundle embedded from `ui/dist`

use axum::{
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "ui/dist"]
#[allow_missing = true]
struct Asset;

const INDEX: &str = "index.html";

pub struct UIHandler;

impl UIHandler {
    /// Serve an embedded asset, falling back to `index.html` for unknown paths
    pub async fn serve(uri: Uri) -> Response {
        let path = match uri.path().trim_start_matches('/') {
            "" => INDEX,
            p => p,
        };

        serve_asset(path)
            .or_else(|| serve_asset(INDEX))
            .unwrap_or_else(|| (StatusCode::NOT_FOUND, "UI bundle not built").into_response())
    }
}

fn serve_asset(path: &str) -> Option<Response> {
    let content = Asset::get(path)?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    Some(([(header::CONTENT_TYPE, mime.as_ref().to_string())], content.data).into_response())
}
