//! Unified error handling with Sentry integration.
//!
//! Route handlers return `Result<T, AppError>`. Every error renders as
//! `{"error": "<message>"}`; server-side failures are captured to Sentry and
//! answered with a generic message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

const INTERNAL_MESSAGE: &str = "Internal server error";

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(err) => match err {
                AuthError::MissingCredentials
                | AuthError::InvalidUsername(_)
                | AuthError::WeakPassword(_)
                | AuthError::MissingIdToken => StatusCode::BAD_REQUEST,
                AuthError::InvalidCredentials | AuthError::InvalidGoogleToken(_) => {
                    StatusCode::UNAUTHORIZED
                }
                AuthError::UsernameTaken | AuthError::EmailTaken | AuthError::UserAlreadyExists => {
                    StatusCode::CONFLICT
                }
                AuthError::GoogleUnavailable(_)
                | AuthError::Repository(_)
                | AuthError::PasswordHash => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Message shown to the client. Never includes internal detail.
    #[must_use]
    pub fn client_message(&self) -> String {
        match self {
            Self::Database(_) => INTERNAL_MESSAGE.to_string(),
            Self::Auth(err) => match err {
                AuthError::MissingCredentials => "Username and password are required".to_string(),
                AuthError::InvalidUsername(e) => format!("Invalid username: {e}"),
                AuthError::WeakPassword(msg) => msg.clone(),
                AuthError::InvalidCredentials => "Invalid username or password".to_string(),
                AuthError::UsernameTaken => "Username already exists".to_string(),
                AuthError::EmailTaken => "Email already exists".to_string(),
                AuthError::UserAlreadyExists => "User already exists".to_string(),
                AuthError::MissingIdToken => "ID token is required".to_string(),
                AuthError::InvalidGoogleToken(_) => "Invalid Google token".to_string(),
                AuthError::GoogleUnavailable(_)
                | AuthError::Repository(_)
                | AuthError::PasswordHash => INTERNAL_MESSAGE.to_string(),
            },
            Self::NotFound(msg) | Self::BadRequest(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, %status, "Client error");
        }

        (status, Json(json!({ "error": self.client_message() }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
