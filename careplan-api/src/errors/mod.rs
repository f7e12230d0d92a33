//! Errors returned to API clients.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use careplan_repository::RepositoryError;
use thiserror::Error;
use tracing::error;

use crate::server::response::failure;

/// Errors that end a request, each mapped to an HTTP status.
#[derive(Error, Debug)]
pub enum ApiError {
    /// One or more request fields broke a validation rule.
    #[error("{0}")]
    Validation(String),

    /// The request could not be read (malformed JSON, id or query).
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// The request references a user or careplan that does not exist.
    #[error("{0}")]
    InvalidReference(String),

    /// Failure inside the service. The message is logged, never returned.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a bad request error.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) | ApiError::InvalidReference(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::ForeignKeyViolation(constraint) => Self::InvalidReference(format!(
                "Referenced record does not exist ({})",
                constraint
            )),
            RepositoryError::InvalidSortColumn { .. } => Self::BadRequest(err.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::Internal(detail) => {
                error!(error = %detail, "Request failed");
                failure(status, "Internal server error")
            }
            other => failure(status, other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_errors_map_to_client_errors() {
        let err = ApiError::from(RepositoryError::ForeignKeyViolation(
            "asset_biometrics_owner_user_id_fkey".to_string(),
        ));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(matches!(err, ApiError::InvalidReference(_)));

        let err = ApiError::from(RepositoryError::InvalidSortColumn {
            field: "Secret".to_string(),
            allowed: "Name".to_string(),
        });
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_database_errors_are_internal() {
        let err = ApiError::from(RepositoryError::DatabaseError(sqlx::Error::PoolTimedOut));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_found_response_status() {
        let response = ApiError::not_found("Reflection with id 3 cannot be found!").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
