//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use domain_transfer::{InquiryError, TransferError};

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Upstream failure: {0}")]
    Upstream(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Validation error: {0}")]
    Validation(String, Option<Vec<String>>),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message, details) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::Upstream(msg) => (StatusCode::BAD_GATEWAY, "upstream_failure", msg, None),
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg, None)
            }
            ApiError::Validation(msg, details) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                msg,
                details,
            ),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<TransferError> for ApiError {
    fn from(err: TransferError) -> Self {
        match err {
            TransferError::InvalidTransition { .. }
            | TransferError::NonMonotonicTimestamp { .. }
            | TransferError::SequenceViolation(_) => ApiError::Conflict(err.to_string()),
            TransferError::InquiryFailed(inner) => ApiError::from(inner),
            TransferError::Validation(msg) => ApiError::Validation(msg, None),
        }
    }
}

impl From<InquiryError> for ApiError {
    fn from(err: InquiryError) -> Self {
        ApiError::Upstream(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| format!("{field}: {m}"))
                        .unwrap_or_else(|| format!("{field}: invalid"))
                })
            })
            .collect();
        ApiError::Validation("request failed validation".to_string(), Some(details))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_transfer::TransactionStatus;

    #[test]
    fn sequence_violation_maps_to_conflict() {
        let err = ApiError::from(TransferError::sequence("out of order"));
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[test]
    fn invalid_transition_maps_to_conflict() {
        let err = ApiError::from(TransferError::InvalidTransition {
            from: Some(TransactionStatus::Complete),
            to: TransactionStatus::ManifestRequested,
        });
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[test]
    fn inquiry_failure_maps_to_upstream() {
        let err = ApiError::from(TransferError::InquiryFailed(InquiryError::Timeout {
            duration_ms: 5000,
        }));
        assert!(matches!(err, ApiError::Upstream(_)));
    }
}
