//! Database migration commands.
//!
//! # Usage
//!
//! ```bash
//! cb-cli migrate
//! ```
//!
//! Migrations live in `crates/api/migrations/` and are embedded at build
//! time. Already-applied migrations are skipped.

use super::{CommandError, connect};

/// Apply all pending migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../api/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    pool.close().await;
    Ok(())
}
