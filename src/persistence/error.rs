//! Document store error types

use thiserror::Error;

/// Errors that can occur while reading or writing documents
#[derive(Debug, Error)]
pub enum StoreError {
    /// Document not found
    #[error("Document not found: {collection} with id '{id}'")]
    NotFound { collection: String, id: String },

    /// Document data rejected by the collection schema
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Collection name not served by this instance
    #[error("Unknown collection: '{0}'")]
    UnknownCollection(String),

    /// Storage directory or file error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    /// Convert to HTTP status code for API responses
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::UnknownCollection(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Io(_) | Self::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_codes() {
        let not_found = StoreError::NotFound {
            collection: "todos".to_string(),
            id: "abc".to_string(),
        };
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.to_string(), "Document not found: todos with id 'abc'");
        assert_eq!(
            StoreError::Validation("missing title".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            StoreError::UnknownCollection("notes".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        let io = StoreError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        assert_eq!(io.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
