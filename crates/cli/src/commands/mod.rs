//! Command implementations.

pub mod migrate;
pub mod seed;
pub mod user;

use comparebuddy_api::config::{ApiConfig, ConfigError};
use comparebuddy_api::db;
use comparebuddy_api::services::AuthError;
use sqlx::PgPool;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded from the environment.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database connection or query error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A migration failed to apply.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A seed file could not be read.
    #[error("Cannot read {path}: {source}")]
    SeedFile {
        path: String,
        source: std::io::Error,
    },

    /// User creation was refused.
    #[error("{0}")]
    Auth(#[from] AuthError),
}

/// Connect to the database named by `API_DATABASE_URL` (or `DATABASE_URL`).
async fn connect() -> Result<PgPool, CommandError> {
    let config = ApiConfig::from_env()?;
    tracing::info!("Connecting to database...");
    Ok(db::create_pool(&config.database_url, config.db_max_connections).await?)
}
