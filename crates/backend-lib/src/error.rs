// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use crate::auth::AuthError;
use crate::validation::ValidationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use credentials_common::{ErrorBody, ErrorDetail};
use thiserror::Error;

/// Application error types with error codes and context
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Auth(AuthError::DuplicateIdentity { .. })
            | AppError::Auth(AuthError::InvalidCredentials) => StatusCode::BAD_REQUEST,
            AppError::Auth(AuthError::IdentityNotFound { .. }) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Auth(AuthError::Infrastructure(_)) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Auth(AuthError::DuplicateIdentity { .. }) => "AUTH_001",
            AppError::Auth(AuthError::IdentityNotFound { .. }) => "AUTH_002",
            AppError::Auth(AuthError::InvalidCredentials) => "AUTH_003",
            AppError::Auth(AuthError::Infrastructure(_)) => "INFRA_001",
            AppError::Validation(_) => "VAL_001",
            AppError::InvalidInput(_) => "VAL_002",
            AppError::Internal(_) => "INT_001",
        }
    }

    /// Get a sanitized message suitable for production use.
    ///
    /// Unknown email and wrong password read the same.
    pub fn sanitized_message(&self) -> String {
        match self {
            AppError::Auth(AuthError::DuplicateIdentity { .. }) => "Email in use".to_string(),
            AppError::Auth(AuthError::IdentityNotFound { .. })
            | AppError::Auth(AuthError::InvalidCredentials) => {
                "Invalid email or password".to_string()
            },
            AppError::Validation(e) => e.to_string(),
            AppError::InvalidInput(_) => "Invalid request format".to_string(),
            AppError::Auth(AuthError::Infrastructure(_)) | AppError::Internal(_) => {
                "An internal server error occurred".to_string()
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        // Use detailed messages in development, sanitized in production
        let message = if cfg!(debug_assertions) {
            self.to_string()
        } else {
            self.sanitized_message()
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message,
            },
        };

        (status, axum::Json(body)).into_response()
    }
}
