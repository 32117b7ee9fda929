use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use models::validation::Violations;
use service::errors::ServiceError;

/// JSON error body: `{"error": ..., "message": ..., "violations": [...]}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: &'static str,
    pub message: Option<String>,
    pub violations: Option<Violations>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &'static str, message: Option<String>) -> Self {
        Self { status, error, message, violations: None }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found", Some(message.into()))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Bad Request", Some(message.into()))
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(v) => JsonApiError {
                status: StatusCode::BAD_REQUEST,
                error: "Validation Error",
                message: Some(v.to_string()),
                violations: Some(v),
            },
            ServiceError::NotFound(msg) => JsonApiError::not_found(msg),
            ServiceError::Conflict(msg) => JsonApiError::new(StatusCode::CONFLICT, "Conflict", Some(msg)),
            ServiceError::Db(msg) => {
                error!(error = %msg, "storage failure");
                JsonApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    Some("the request could not be completed".to_string()),
                )
            }
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let mut body = json!({ "error": self.error });
        if let Some(msg) = self.message {
            body["message"] = json!(msg);
        }
        if let Some(v) = self.violations {
            body["violations"] = json!(v);
        }
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: JsonApiError) -> (StatusCode, serde_json::Value) {
        let res = err.into_response();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn storage_failures_hide_database_details() {
        let err = ServiceError::Db("UNIQUE constraint failed: employees.email in INSERT INTO employees".into());
        let (status, body) = body_of(err.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal Server Error");
        let text = body.to_string();
        assert!(!text.contains("employees"));
        assert!(!text.contains("INSERT"));
    }

    #[tokio::test]
    async fn conflicts_keep_their_message() {
        let (status, body) = body_of(ServiceError::Conflict("company 'Acme' already exists".into()).into()).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["message"], "company 'Acme' already exists");
    }
}
