use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;
use shared::ErrorResponse;
use thiserror::Error;
use tracing::{error, warn, Level};

use crate::domain::ServiceError;

pub const VALIDATION_FAILED: &str = "Validation failed";
pub const RESOURCE_NOT_FOUND: &str = "Resource Not Found";
pub const BAD_REQUEST: &str = "Bad Request";
pub const NOT_FOUND: &str = "Not Found";
pub const METHOD_NOT_ALLOWED: &str = "Method Not Allowed";
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";
pub const UNEXPECTED_ERROR_OCCURRED: &str = "An unexpected error occurred";

/// Every failure a handler can return.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("Malformed request body: {0}")]
    MalformedBody(#[from] JsonRejection),
    #[error("Invalid path parameter: {0}")]
    InvalidPath(#[from] PathRejection),
    #[error("No handler found for {method} {uri}")]
    NoRoute { method: Method, uri: Uri },
    #[error("Request method '{0}' is not supported")]
    MethodNotAllowed(Method),
}

/// Fallback for paths no route matches
pub async fn route_not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::NoRoute { method, uri }
}

/// Fallback for known paths hit with an unsupported method
pub async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::MethodNotAllowed(method)
}

enum Payload {
    Message(String),
    Errors(Vec<String>),
}

/// Converts an `ApiError` into the uniform error envelope.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, category, payload) = match self {
            ApiError::Service(ServiceError::Validation(violations)) => (
                StatusCode::BAD_REQUEST,
                VALIDATION_FAILED,
                Payload::Errors(violations.iter().map(ToString::to_string).collect()),
            ),
            ApiError::Service(err @ ServiceError::NotFound { .. }) => (
                StatusCode::NOT_FOUND,
                RESOURCE_NOT_FOUND,
                Payload::Message(err.to_string()),
            ),
            ApiError::Service(ServiceError::Conflict(conflict)) => {
                warn!("Rejected request: {}", conflict);
                (
                    StatusCode::BAD_REQUEST,
                    BAD_REQUEST,
                    Payload::Message(conflict.to_string()),
                )
            }
            ApiError::Service(ServiceError::Internal(err)) => {
                // The error chain stays server-side
                if tracing::enabled!(Level::DEBUG) {
                    error!("Unexpected error occurred: {:?}", err);
                } else {
                    error!("Unexpected error occurred: {}", err);
                }
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_SERVER_ERROR,
                    Payload::Message(UNEXPECTED_ERROR_OCCURRED.to_string()),
                )
            }
            ApiError::MalformedBody(rejection) => (
                StatusCode::BAD_REQUEST,
                BAD_REQUEST,
                Payload::Message(rejection.body_text()),
            ),
            ApiError::InvalidPath(rejection) => (
                StatusCode::BAD_REQUEST,
                BAD_REQUEST,
                Payload::Message(rejection.body_text()),
            ),
            err @ ApiError::NoRoute { .. } => (
                StatusCode::NOT_FOUND,
                NOT_FOUND,
                Payload::Message(err.to_string()),
            ),
            err @ ApiError::MethodNotAllowed(_) => (
                StatusCode::METHOD_NOT_ALLOWED,
                METHOD_NOT_ALLOWED,
                Payload::Message(err.to_string()),
            ),
        };

        let (message, errors) = match payload {
            Payload::Message(message) => (Some(message), None),
            Payload::Errors(errors) => (None, Some(errors)),
        };

        let body = ErrorResponse {
            timestamp: Local::now().naive_local(),
            status: status.as_u16(),
            error: category.to_string(),
            message,
            errors,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Conflict, FieldViolation, ResourceKind};

    async fn envelope(err: ApiError) -> (StatusCode, ErrorResponse) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        (status, serde_json::from_slice(&bytes).expect("Body should be an error envelope"))
    }

    #[tokio::test]
    async fn test_validation_lists_all_messages() {
        let err = ApiError::from(ServiceError::Validation(vec![
            FieldViolation::LevelNegative,
            FieldViolation::UnitPattern,
        ]));

        let (status, body) = envelope(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.status, 400);
        assert_eq!(body.error, VALIDATION_FAILED);
        assert_eq!(
            body.errors,
            Some(vec![
                "Level must be a positive number".to_string(),
                "Unit must be either 'mg/dL' or 'mmol/L'".to_string(),
            ])
        );
        assert!(body.message.is_none());
    }

    #[tokio::test]
    async fn test_not_found_names_resource() {
        let err = ApiError::from(ServiceError::not_found(ResourceKind::Patient, 3));

        let (status, body) = envelope(err).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error, RESOURCE_NOT_FOUND);
        assert_eq!(body.message.as_deref(), Some("Patient not found with id : '3'"));
    }

    #[tokio::test]
    async fn test_conflict_is_bad_request() {
        let err = ApiError::from(ServiceError::from(Conflict::PatientIdMismatch));

        let (status, body) = envelope(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, BAD_REQUEST);
        assert_eq!(
            body.message.as_deref(),
            Some("patientId in path does not match patientId in request body")
        );
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let err = ApiError::from(ServiceError::from(anyhow::anyhow!(
            "disk I/O error at /var/lib/secret.db"
        )));

        let (status, body) = envelope(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, INTERNAL_SERVER_ERROR);
        assert_eq!(body.message.as_deref(), Some(UNEXPECTED_ERROR_OCCURRED));
    }

    #[tokio::test]
    async fn test_unrouted_requests_use_envelope() {
        let (status, body) = envelope(route_not_found(Method::GET, Uri::from_static("/api/nothing")).await).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.status, 404);
        assert_eq!(body.error, NOT_FOUND);
        assert_eq!(body.message.as_deref(), Some("No handler found for GET /api/nothing"));

        let (status, body) = envelope(method_not_allowed(Method::PATCH).await).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body.status, 405);
        assert_eq!(body.error, METHOD_NOT_ALLOWED);
        assert_eq!(body.message.as_deref(), Some("Request method 'PATCH' is not supported"));
    }
}
