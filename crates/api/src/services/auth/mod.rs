//! Authentication service.
//!
//! Provides password registration and login, and Google login with
//! find-or-create provisioning.

mod error;
pub mod google;

pub use error::AuthError;
pub use google::{GoogleError, GoogleIdentity, GoogleVerifier};

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use comparebuddy_core::{Username, UsernameError};

use crate::db::RepositoryError;
use crate::db::users::{
    EMAIL_CONSTRAINT, NewGoogleUser, NewPasswordUser, USERNAME_CONSTRAINT, UserRepository,
};
use crate::models::User;

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Argon2id hash (default parameters) of a password nobody has, verified
/// against when the username is unknown or has no password.
const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$Y29tcGFyZWJ1ZGR5LWR1bQ$W06zvYIXvBq7VJa94qTQzFNK++/jD1E8DTjqxZQrPl8";

/// Registration input, as submitted by the client.
#[derive(Debug, Clone, Copy, Default)]
pub struct Registration<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub display_name: &'a str,
}

/// Authentication service.
///
/// Handles password registration and login, and Google login.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    // =========================================================================
    // Password Authentication
    // =========================================================================

    /// Register a new password user.
    ///
    /// Username, email and display name are trimmed. A blank email is stored
    /// as absent and a blank display name falls back to the username.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` if the username or password is empty.
    /// Returns `AuthError::WeakPassword` if the password is too short.
    /// Returns `AuthError::UsernameTaken` / `AuthError::EmailTaken` /
    /// `AuthError::UserAlreadyExists` on a uniqueness conflict.
    #[tracing::instrument(skip(self, registration), fields(username = %registration.username.trim()))]
    pub async fn register(&self, registration: &Registration<'_>) -> Result<User, AuthError> {
        let username = parse_username(registration.username)?;
        if registration.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        validate_password(registration.password)?;

        let password_hash = hash_password(registration.password)?;

        let email = Some(registration.email.trim()).filter(|e| !e.is_empty());
        let display_name = match registration.display_name.trim() {
            "" => username.as_str(),
            name => name,
        };

        let user = self
            .users
            .create_with_password(&NewPasswordUser {
                username: &username,
                email,
                password_hash: &password_hash,
                display_name,
            })
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(constraint) => conflict_error(constraint.as_deref()),
                other => AuthError::Repository(other),
            })?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Login with username and password.
    ///
    /// Unknown usernames, accounts without a password, and wrong passwords
    /// all produce the same error.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` if the username or password is empty.
    /// Returns `AuthError::InvalidCredentials` if the username/password is wrong.
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let username = match parse_username(username) {
            Ok(username) => username,
            Err(AuthError::InvalidUsername(_)) => return Err(AuthError::InvalidCredentials),
            Err(other) => return Err(other),
        };
        if password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let Some((user, password_hash)) = self.users.get_password_hash(&username).await? else {
            // Pay the same Argon2 cost as a wrong password.
            let _ = verify_password(password, DUMMY_PASSWORD_HASH);
            return Err(AuthError::InvalidCredentials);
        };

        verify_password(password, &password_hash)?;

        Ok(user)
    }

    // =========================================================================
    // Google Authentication
    // =========================================================================

    /// Verify a Google ID token and return the matching user, creating one
    /// on first login.
    ///
    /// New accounts use the Google email as both username and email, and
    /// the Google name (or the email when there is none) as display name.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingIdToken` if the token is empty.
    /// Returns `AuthError::InvalidGoogleToken` if Google does not accept the token.
    /// Returns `AuthError::GoogleUnavailable` if Google cannot be reached.
    /// Returns `AuthError::Repository` if the lookup or insert fails.
    #[tracing::instrument(skip(self, verifier, id_token))]
    pub async fn google_login(
        &self,
        verifier: &GoogleVerifier,
        id_token: &str,
    ) -> Result<User, AuthError> {
        let id_token = id_token.trim();
        if id_token.is_empty() {
            return Err(AuthError::MissingIdToken);
        }

        let identity = verifier.verify(id_token).await?;

        if let Some(user) = self.users.get_by_google_id(&identity.subject).await? {
            return Ok(user);
        }

        let username = Username::parse(&identity.email).map_err(AuthError::InvalidUsername)?;
        let display_name = identity.name.as_deref().unwrap_or(&identity.email);

        let created = self
            .users
            .create_google_user(&NewGoogleUser {
                google_id: &identity.subject,
                username: &username,
                email: &identity.email,
                display_name,
                avatar_url: identity.picture.as_deref(),
            })
            .await?;

        if let Some(user) = created {
            tracing::info!(user_id = %user.id, "Provisioned user from Google login");
            return Ok(user);
        }

        // A concurrent first login for the same Google account won the insert.
        self.users
            .get_by_google_id(&identity.subject)
            .await?
            .ok_or(AuthError::Repository(RepositoryError::NotFound))
    }
}

/// Parse a submitted username, treating blank input as missing.
fn parse_username(raw: &str) -> Result<Username, AuthError> {
    Username::parse(raw).map_err(|e| match e {
        UsernameError::Empty => AuthError::MissingCredentials,
        other => AuthError::InvalidUsername(other),
    })
}

/// Map a violated unique constraint to the conflict reported to the client.
fn conflict_error(constraint: Option<&str>) -> AuthError {
    match constraint {
        Some(USERNAME_CONSTRAINT) => AuthError::UsernameTaken,
        Some(EMAIL_CONSTRAINT) => AuthError::EmailTaken,
        _ => AuthError::UserAlreadyExists,
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_password_length_boundary() {
        assert!(matches!(
            validate_password("12345"),
            Err(AuthError::WeakPassword(_))
        ));
        assert!(validate_password("123456").is_ok());
    }

    #[test]
    fn test_password_length_counts_characters() {
        // Six characters, more than six bytes.
        assert!(validate_password("ขอบคุณ").is_ok());
        // Five characters, more than six bytes.
        assert!(validate_password("ééééé").is_err());
    }

    #[test]
    fn test_weak_password_message() {
        let Err(AuthError::WeakPassword(message)) = validate_password("abc") else {
            panic!("expected weak password");
        };
        assert_eq!(message, "Password must be at least 6 characters");
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("hunter22").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("hunter22", &hash).is_ok());
        assert!(matches!(
            verify_password("hunter23", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_hashes_are_salted() {
        assert_ne!(hash_password("same-password").unwrap(), hash_password("same-password").unwrap());
    }

    #[test]
    fn test_dummy_hash_costs_the_same_as_a_real_one() {
        let dummy = PasswordHash::new(DUMMY_PASSWORD_HASH).unwrap();
        let real_hash = hash_password("hunter22").unwrap();
        let real = PasswordHash::new(&real_hash).unwrap();

        assert_eq!(dummy.algorithm, real.algorithm);
        assert_eq!(
            argon2::Params::try_from(&dummy).unwrap(),
            argon2::Params::try_from(&real).unwrap()
        );
        assert!(matches!(
            verify_password("hunter22", DUMMY_PASSWORD_HASH),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_against_malformed_hash() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_conflict_classification_by_constraint_name() {
        assert!(matches!(
            conflict_error(Some("users_username_key")),
            AuthError::UsernameTaken
        ));
        assert!(matches!(
            conflict_error(Some("users_email_key")),
            AuthError::EmailTaken
        ));
        assert!(matches!(
            conflict_error(Some("users_google_id_key")),
            AuthError::UserAlreadyExists
        ));
        assert!(matches!(conflict_error(None), AuthError::UserAlreadyExists));
    }

    #[test]
    fn test_blank_username_is_missing_credentials() {
        assert!(matches!(
            parse_username("   "),
            Err(AuthError::MissingCredentials)
        ));
        assert!(matches!(
            parse_username(&"x".repeat(300)),
            Err(AuthError::InvalidUsername(UsernameError::TooLong { .. }))
        ));
        assert_eq!(parse_username(" bob ").unwrap().as_str(), "bob");
    }
}
