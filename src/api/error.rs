//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::digilocker::SourceError;
use crate::gate::GateError;
use crate::models::{CredentialError, Role};
use crate::store::StoreError;
use crate::upload::ValidationError;
use crate::verify::WorkflowError;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication required")]
    NotAuthenticated,
    #[error("Requires the {} role", .required.as_str())]
    NotAuthorized { required: Role },
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::NotAuthenticated => (
                StatusCode::UNAUTHORIZED,
                "AUTH_REQUIRED",
                "Authentication required".to_string(),
            ),
            ApiError::NotAuthorized { required } => (
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                format!("Requires the {} role", required.as_str()),
            ),
            ApiError::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, "VALIDATION", detail.clone())
            }
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, "NOT_FOUND", detail.clone()),
            ApiError::Conflict(detail) => (StatusCode::CONFLICT, "CONFLICT", detail.clone()),
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };
        (status, Json(body)).into_response()
    }
}

impl From<GateError> for ApiError {
    fn from(err: GateError) -> Self {
        match err {
            GateError::NotAuthenticated => ApiError::NotAuthenticated,
            GateError::NotAuthorized { required } => ApiError::NotAuthorized { required },
        }
    }
}

impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<WorkflowError> for ApiError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::Validation(e) => ApiError::BadRequest(e.to_string()),
            WorkflowError::DocumentNotFound(id) => {
                ApiError::NotFound(format!("Document not found: {id}"))
            }
            e @ WorkflowError::InvalidStateTransition { .. } => ApiError::Conflict(e.to_string()),
            WorkflowError::Cancelled => {
                ApiError::Internal("Verification cancelled before completion".into())
            }
            WorkflowError::Store(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<SourceError> for ApiError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::MissingAbcId => ApiError::BadRequest(err.to_string()),
            SourceError::NotConnected => ApiError::Conflict(err.to_string()),
            SourceError::UnknownDocument(_) => ApiError::NotFound(err.to_string()),
        }
    }
}
