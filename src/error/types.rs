/**
 * API Error Types
 *
 * This module defines the error taxonomy surfaced by HTTP handlers. Each
 * variant maps to one HTTP status code, and the variant boundary separates
 * client faults (validation, authentication, authorization, not-found) from
 * server faults (persistence).
 *
 * Errors are propagated, never retried: a persistence failure surfaces as a
 * 500 with a machine-readable body and a log line, and nothing is silently
 * swallowed.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::roadmap::RoadmapError;

/// API-level error type
///
/// Returned by every HTTP handler. Converts into a JSON error response via
/// the `IntoResponse` implementation in `conversion.rs`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed input
    #[error("{0}")]
    Validation(String),

    /// Missing or invalid credentials
    #[error("{0}")]
    Authentication(String),

    /// The caller is authenticated but not allowed to perform the action
    #[error("{0}")]
    Authorization(String),

    /// Uniqueness conflict (e.g. duplicate signup email)
    #[error("{0}")]
    Conflict(String),

    /// Unknown id, or an id outside the caller's visible set
    #[error("{0}")]
    NotFound(String),

    /// Constraint violation or transaction failure in the storage layer
    #[error("persistence error: {0}")]
    Persistence(#[from] sqlx::Error),

    /// Internal error outside the storage layer (e.g. hashing failure)
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }

    pub fn authorization(message: impl Into<String>) -> Self {
        Self::Authorization(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Authentication(_) => StatusCode::UNAUTHORIZED,
            Self::Authorization(_) => StatusCode::FORBIDDEN,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Persistence(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing error message
    ///
    /// Persistence details are not echoed to clients; the full error is
    /// logged server-side instead.
    pub fn message(&self) -> String {
        match self {
            Self::Persistence(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<RoadmapError> for ApiError {
    fn from(err: RoadmapError) -> Self {
        match err {
            RoadmapError::InvalidArgument(message) => Self::Validation(message),
            RoadmapError::Persistence(sqlx::Error::RowNotFound) => {
                Self::NotFound("Not found".to_string())
            }
            RoadmapError::Persistence(e) => Self::Persistence(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            ApiError::validation("bad input").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::authentication("no token").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::authorization("not yours").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::conflict("taken").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::not_found("missing").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(sqlx::Error::PoolClosed).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_persistence_message_not_leaked() {
        let error = ApiError::from(sqlx::Error::PoolClosed);
        assert_eq!(error.message(), "Internal server error");
    }

    #[test]
    fn test_roadmap_invalid_argument_maps_to_validation() {
        let error: ApiError =
            RoadmapError::InvalidArgument("Both topic and field are required".to_string()).into();
        match error {
            ApiError::Validation(message) => {
                assert_eq!(message, "Both topic and field are required");
            }
            _ => panic!("Expected Validation"),
        }
    }

    #[test]
    fn test_roadmap_row_not_found_maps_to_not_found() {
        let error: ApiError = RoadmapError::Persistence(sqlx::Error::RowNotFound).into();
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
    }
}
