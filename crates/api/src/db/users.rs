//! User repository for database operations.

use sqlx::PgPool;

use comparebuddy_core::Username;

use super::RepositoryError;
use crate::models::User;

/// Name of the unique constraint on `users.username`.
pub const USERNAME_CONSTRAINT: &str = "users_username_key";

/// Name of the unique constraint on `users.email`.
pub const EMAIL_CONSTRAINT: &str = "users_email_key";

/// Name of the unique constraint on `users.google_id`.
pub const GOOGLE_ID_CONSTRAINT: &str = "users_google_id_key";

/// A password account about to be inserted.
#[derive(Debug)]
pub struct NewPasswordUser<'a> {
    pub username: &'a Username,
    pub email: Option<&'a str>,
    pub password_hash: &'a str,
    pub display_name: &'a str,
}

/// A Google-provisioned account about to be inserted.
#[derive(Debug)]
pub struct NewGoogleUser<'a> {
    pub google_id: &'a str,
    pub username: &'a Username,
    pub email: &'a str,
    pub display_name: &'a str,
    pub avatar_url: Option<&'a str>,
}

#[derive(sqlx::FromRow)]
struct UserWithHash {
    #[sqlx(flatten)]
    user: User,
    password_hash: Option<String>,
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a password account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` naming the violated constraint if
    /// the username or email is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    #[tracing::instrument(skip(self, new_user), fields(username = %new_user.username))]
    pub async fn create_with_password(
        &self,
        new_user: &NewPasswordUser<'_>,
    ) -> Result<User, RepositoryError> {
        sqlx::query_as::<_, User>(
            r"
            INSERT INTO users (username, email, password_hash, display_name)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, display_name, google_id, avatar_url, created_at
            ",
        )
        .bind(new_user.username)
        .bind(new_user.email)
        .bind(new_user.password_hash)
        .bind(new_user.display_name)
        .fetch_one(self.pool)
        .await
        .map_err(RepositoryError::from_write)
    }

    /// Get a user and their password hash by exact username.
    ///
    /// Returns `None` if the user doesn't exist or has no password set
    /// (Google-only accounts).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[tracing::instrument(skip(self), fields(username = %username))]
    pub async fn get_password_hash(
        &self,
        username: &Username,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, UserWithHash>(
            r"
            SELECT id, username, email, display_name, google_id, avatar_url, created_at,
                   password_hash
            FROM users
            WHERE username = $1
            ",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.and_then(|r| r.password_hash.map(|hash| (r.user, hash))))
    }

    /// Get a user by their Google subject id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[tracing::instrument(skip(self))]
    pub async fn get_by_google_id(&self, google_id: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, User>(
            r"
            SELECT id, username, email, display_name, google_id, avatar_url, created_at
            FROM users
            WHERE google_id = $1
            ",
        )
        .bind(google_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// Insert a Google account unless one with the same Google id exists.
    ///
    /// Returns `None` when another request inserted the same Google id
    /// first; the caller should then read the existing row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username or email belongs
    /// to a different account.
    /// Returns `RepositoryError::Database` for other database errors.
    #[tracing::instrument(skip(self, new_user), fields(google_id = %new_user.google_id))]
    pub async fn create_google_user(
        &self,
        new_user: &NewGoogleUser<'_>,
    ) -> Result<Option<User>, RepositoryError> {
        sqlx::query_as::<_, User>(
            r"
            INSERT INTO users (username, email, display_name, google_id, avatar_url)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (google_id) DO NOTHING
            RETURNING id, username, email, display_name, google_id, avatar_url, created_at
            ",
        )
        .bind(new_user.username)
        .bind(new_user.email)
        .bind(new_user.display_name)
        .bind(new_user.google_id)
        .bind(new_user.avatar_url)
        .fetch_optional(self.pool)
        .await
        .map_err(RepositoryError::from_write)
    }
}
