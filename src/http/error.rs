//! JSON error envelope and service error mapping.

use crate::todo::domain::TodoDomainError;
use crate::todo::services::{ListServiceError, ServiceErrorKind, TaskServiceError};
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::error::Error;

/// Machine-readable code for validation failures.
pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
/// Machine-readable code for missing resources.
pub const NOT_FOUND: &str = "NOT_FOUND";
/// Machine-readable code for internal failures.
pub const SERVER_ERROR: &str = "SERVER_ERROR";

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Field-level errors for validation failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the offending field.
    pub field: String,
    /// Why the field was rejected.
    pub message: String,
}

/// Status code paired with an error body.
#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            error: ApiError {
                code: code.to_owned(),
                message: message.into(),
                details: None,
            },
        }
    }

    /// Creates a 400 response.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, VALIDATION_FAILED, message)
    }

    /// Creates a 404 response.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, NOT_FOUND, message)
    }

    /// Creates a 500 response with a generic message.
    #[must_use]
    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            SERVER_ERROR,
            "an internal error occurred",
        )
    }

    fn validation(err: &TodoDomainError) -> Self {
        let field = match err {
            TodoDomainError::InvalidListTitle { .. } => "title",
            TodoDomainError::InvalidTaskText { .. } => "text",
        };
        let mut response = Self::bad_request("validation failed");
        response.error.details = Some(vec![FieldError {
            field: field.to_owned(),
            message: err.to_string(),
        }]);
        response
    }

    fn classify(kind: ServiceErrorKind, err: &(dyn Error + 'static)) -> Self {
        match kind {
            ServiceErrorKind::Validation => Self::bad_request(err.to_string()),
            ServiceErrorKind::NotFound => Self::not_found(err.to_string()),
            ServiceErrorKind::Storage => {
                tracing::error!(error = %error_chain(err), "storage failure");
                Self::internal()
            }
        }
    }
}

/// Renders an error and all of its sources on one line.
fn error_chain(err: &(dyn Error + 'static)) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<ListServiceError> for ApiErrorResponse {
    fn from(err: ListServiceError) -> Self {
        match &err {
            ListServiceError::Domain(domain) => Self::validation(domain),
            ListServiceError::Repository(_) => Self::classify(err.kind(), &err),
        }
    }
}

impl From<TaskServiceError> for ApiErrorResponse {
    fn from(err: TaskServiceError) -> Self {
        match &err {
            TaskServiceError::Domain(domain) => Self::validation(domain),
            TaskServiceError::List(_) | TaskServiceError::Repository(_) => {
                Self::classify(err.kind(), &err)
            }
        }
    }
}

impl From<JsonRejection> for ApiErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiErrorResponse {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}
