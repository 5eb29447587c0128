use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

pub const MISSING_FIELDS: &str = "Name and color are required";
pub const NO_DATA: &str = "No data provided";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Body absent, unparseable, or missing required fields (400)
    #[error("{0}")]
    InvalidInput(&'static str),

    /// No language with the requested id (404)
    #[error("Language not found")]
    NotFound,

    /// Path did not match any route, or the id was not an integer (404)
    #[error("Not found")]
    RouteNotFound,

    /// Known path, unsupported method (405)
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Database could not be reached or a statement failed (500)
    #[error("Database error: {0}")]
    Store(#[from] sqlx::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Store(e) => {
                error!("Request failed: {}", e);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let (status, body) = body_json(ApiError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Language not found"}));
    }

    #[tokio::test]
    async fn test_invalid_input_body() {
        let (status, body) = body_json(ApiError::InvalidInput(MISSING_FIELDS)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Name and color are required"}));
    }

    #[tokio::test]
    async fn test_store_error_hides_cause() {
        let (status, body) = body_json(ApiError::Store(sqlx::Error::PoolTimedOut)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Internal server error"}));
    }
}
