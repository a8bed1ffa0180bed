//! Error types for the todo service.
//!
//! # Design
//! `ApiError` is what handlers return. A lookup miss becomes a 404 with the
//! `{"detail": ...}` body existing clients already parse. Storage failures
//! are logged with their cause and surface as an opaque 500.
//! `StartupError` covers everything that makes the binary exit before it
//! starts serving.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::config::ConfigError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("todo {id} not found")]
    NotFound { id: i64 },

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { id } => Self::NotFound { id },
            other => Self::Store(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            Self::NotFound { id } => {
                tracing::debug!(id, "todo not found");
                (StatusCode::NOT_FOUND, "Todo not found")
            }
            Self::Store(e) => {
                tracing::error!("storage error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

/// Failures that stop the process before it serves a request.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("creating the todos table failed: {0}")]
    Schema(#[source] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn not_found_is_404_with_detail() {
        let response = ApiError::from(StoreError::NotFound { id: 9999 }).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({ "detail": "Todo not found" }));
    }

    #[tokio::test]
    async fn storage_failure_is_opaque_500() {
        let err = ApiError::from(StoreError::Sqlx(sqlx::Error::PoolTimedOut));
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "detail": "Internal Server Error" })
        );
    }

    #[test]
    fn schema_failure_is_reported_separately() {
        let connect = StartupError::from(sqlx::Error::PoolTimedOut);
        let schema = StartupError::Schema(sqlx::Error::PoolTimedOut);

        assert!(connect.to_string().starts_with("database connection failed"));
        assert!(schema.to_string().starts_with("creating the todos table failed"));
    }
}
