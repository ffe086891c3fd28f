//! Database operations for the API `PostgreSQL` database.
//!
//! # Tables
//!
//! - `users` - Password and Google-provisioned accounts
//! - `main_categories` / `categories` - Two-level catalog taxonomy
//! - `items` - Generic catalog entries
//! - `car_brands` / `car_models` / `car_variants` - Car hierarchy with the
//!   wide per-variant specification record
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p comparebuddy-cli -- migrate
//! ```

pub mod cars;
pub mod categories;
pub mod filter;
pub mod items;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use cars::CarRepository;
pub use categories::CategoryRepository;
pub use filter::FilterQuery;
pub use items::ItemRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Unique constraint violation, carrying the constraint name when the
    /// database reports one.
    #[error("constraint violation: {}", .0.as_deref().unwrap_or("unknown"))]
    Conflict(Option<String>),
}

impl RepositoryError {
    /// Classify a sqlx error, turning unique violations into [`Self::Conflict`].
    pub(crate) fn from_write(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_unique_violation()
        {
            return Self::Conflict(db_err.constraint().map(str::to_owned));
        }
        Self::Database(e)
    }
}

/// Create a `PostgreSQL` connection pool.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
/// * `max_connections` - Upper bound on pooled connections
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &secrecy::SecretString,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(max_connections.min(2))
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
