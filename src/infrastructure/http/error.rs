//! HTTP Error Handling

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::dto::MISSING_FIELD;
use crate::application::ApplicationError;

/// Field name -> messages, as reported for an invalid body
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Error body shared by every failing endpoint
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ErrorLocations>,
}

/// Where the invalid fields were found. Only JSON bodies are validated.
#[derive(Debug, Serialize)]
pub struct ErrorLocations {
    pub json: FieldErrors,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code: status.as_u16(),
            status: status.canonical_reason().unwrap_or_default().to_string(),
            message: message.into(),
            errors: None,
        }
    }
}

/// HTTP-facing error, rendered as `{code, status, message[, errors]}`
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    /// Request body failed schema validation
    Validation(FieldErrors),
    Unauthorized(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

pub const INVALID_PAYLOAD: &str = "Invalid request payload.";

/// Response extension set by error types that already logged themselves
#[derive(Debug, Clone, Copy)]
pub struct ErrorLogged;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Single-field validation failure
    pub fn field(field: &str, message: &str) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), vec![message.to_string()]);
        ApiError::Validation(errors)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let response = match self {
            ApiError::Validation(errors) => {
                tracing::warn!(fields = ?errors.keys().collect::<Vec<_>>(), "Invalid request payload");
                ErrorResponse {
                    errors: Some(ErrorLocations { json: errors }),
                    ..ErrorResponse::new(status, INVALID_PAYLOAD)
                }
            }
            ApiError::Internal(msg) => {
                tracing::error!(status = status.as_u16(), error = %msg, "Internal server error");
                ErrorResponse::new(status, msg)
            }
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg) => {
                tracing::warn!(status = status.as_u16(), error = %msg, "Request rejected");
                ErrorResponse::new(status, msg)
            }
        };

        let mut response = (status, Json(response)).into_response();
        response.extensions_mut().insert(ErrorLogged);
        response
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::NotFound { resource_type, .. } => {
                ApiError::NotFound(format!("{} not found.", resource_type))
            }
            ApplicationError::LinkNotFound { .. } => ApiError::NotFound(e.to_string()),
            ApplicationError::ValidationError(msg) => ApiError::BadRequest(msg),
            ApplicationError::MissingField(field) => ApiError::field(field, MISSING_FIELD),
            ApplicationError::BusinessRuleViolation(msg) => ApiError::BadRequest(msg),
            ApplicationError::Conflict(msg) => ApiError::Conflict(msg),
            ApplicationError::InvalidCredentials => ApiError::Unauthorized(e.to_string()),
            ApplicationError::RepositoryError(err) => {
                // storage details stay in the log
                tracing::error!(error = %err, "Repository failure");
                ApiError::Internal("An internal error occurred.".to_string())
            }
            ApplicationError::InternalError(msg) => ApiError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::{json, Value};

    async fn body_of(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_body() {
        let (status, body) = body_of(ApiError::field("name", "Missing data for required field.")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({
                "code": 400,
                "status": "Bad Request",
                "message": "Invalid request payload.",
                "errors": {"json": {"name": ["Missing data for required field."]}}
            })
        );
    }

    #[test]
    fn test_response_is_marked_logged() {
        let response = ApiError::NotFound("Item not found.".to_string()).into_response();
        assert!(response.extensions().get::<ErrorLogged>().is_some());
    }

    #[tokio::test]
    async fn test_invalid_credentials_body() {
        let (status, body) = body_of(ApplicationError::InvalidCredentials.into()).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            body,
            json!({"code": 401, "status": "Unauthorized", "message": "Invalid credentials."})
        );
    }

    #[tokio::test]
    async fn test_repository_error_is_not_leaked() {
        let err = ApplicationError::RepositoryError(
            crate::application::RepositoryError::DatabaseError("disk I/O error".to_string()),
        );
        let (status, body) = body_of(err.into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body["message"].as_str().unwrap().contains("disk"));
    }

    #[tokio::test]
    async fn test_missing_field_lists_the_field() {
        let (status, body) = body_of(ApplicationError::MissingField("store_id").into()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["errors"],
            json!({"json": {"store_id": ["Missing data for required field."]}})
        );
    }

    #[tokio::test]
    async fn test_link_not_found() {
        let err = ApplicationError::LinkNotFound { item_id: 1, tag_id: 2 };
        let (status, body) = body_of(err.into()).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Tag is not linked to item.");
    }
}
