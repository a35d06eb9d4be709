use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by the HTTP API. Every variant renders as
/// `{"error": "..."}` with the matching status code; internal failures are
/// logged server-side and never leak their cause to the client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message.clone()),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message.clone()),
            ApiError::Conflict(message) => (StatusCode::CONFLICT, message.clone()),
            ApiError::Internal(err) => {
                tracing::error!("Internal error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Helper Functions ====================

    async fn response_parts(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Should read body");
        let body = serde_json::from_slice(&bytes).expect("Body should be JSON");
        (status, body)
    }

    // ==================== Response Mapping Tests ====================

    #[tokio::test]
    async fn test_bad_request_response() {
        let (status, body) =
            response_parts(ApiError::BadRequest("Invalid request data".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid request data" }));
    }

    #[tokio::test]
    async fn test_not_found_response() {
        let (status, body) =
            response_parts(ApiError::NotFound("Survey not found".to_string())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Survey not found" }));
    }

    #[tokio::test]
    async fn test_conflict_response() {
        let (status, body) =
            response_parts(ApiError::Conflict("Survey id already taken".to_string())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body, json!({ "error": "Survey id already taken" }));
    }

    #[tokio::test]
    async fn test_internal_error_hides_cause() {
        let error = ApiError::from(anyhow::anyhow!("connection pool exhausted"));
        let (status, body) = response_parts(error).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Internal server error" }));
    }

    #[test]
    fn test_display_uses_message() {
        let error = ApiError::NotFound("Survey not found".to_string());
        assert_eq!(error.to_string(), "Survey not found");
    }
}
