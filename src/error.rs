//! Error types for the banner service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Repository Error Enum ==
/// Unified error type for repository operations and the HTTP layer.
///
/// None of these outcomes is ever cached.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Requested record does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// Write would violate a uniqueness constraint
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Any other failure of the backing store
    #[error("Backing store error: {0}")]
    Backend(String),
}

impl RepositoryError {
    pub fn banner_not_found(id: i64) -> Self {
        Self::NotFound(format!("Banner with ID {}", id))
    }

    pub fn click_not_found(id: i64) -> Self {
        Self::NotFound(format!("Click with ID {}", id))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for RepositoryError {
    fn into_response(self) -> Response {
        let status = match &self {
            RepositoryError::NotFound(_) => StatusCode::NOT_FOUND,
            RepositoryError::Conflict(_) => StatusCode::CONFLICT,
            RepositoryError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            RepositoryError::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
