//! Authentication error types.

use thiserror::Error;

use comparebuddy_core::UsernameError;

use super::google::GoogleError;
use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username or password missing from the request.
    #[error("username and password are required")]
    MissingCredentials,

    /// Username present but unusable (e.g. too long).
    #[error("invalid username: {0}")]
    InvalidUsername(UsernameError),

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Invalid credentials (wrong password or user not found).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The username belongs to another account.
    #[error("username already exists")]
    UsernameTaken,

    /// The email belongs to another account.
    #[error("email already exists")]
    EmailTaken,

    /// Some other unique field collides with an existing account.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Google login without a token.
    #[error("ID token is required")]
    MissingIdToken,

    /// The identity provider did not vouch for the token.
    #[error("invalid Google token: {0}")]
    InvalidGoogleToken(GoogleError),

    /// The identity provider could not be reached.
    #[error("identity provider unavailable: {0}")]
    GoogleUnavailable(GoogleError),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

impl From<GoogleError> for AuthError {
    fn from(err: GoogleError) -> Self {
        if err.is_invalid_token() {
            Self::InvalidGoogleToken(err)
        } else {
            Self::GoogleUnavailable(err)
        }
    }
}
