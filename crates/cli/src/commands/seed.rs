//! Seed the catalog tables from a SQL file.
//!
//! The file is executed as-is, in one transaction, so it may hold any number
//! of statements. The bundled fixture is idempotent.

use std::path::Path;

use super::{CommandError, connect};

/// Default fixture, relative to the workspace root.
pub const DEFAULT_SEED_FILE: &str = "crates/api/fixtures/catalog.sql";

/// Execute every statement in `file_path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or any statement fails; in the
/// latter case nothing is committed.
pub async fn catalog(file_path: &Path) -> Result<(), CommandError> {
    let sql = tokio::fs::read_to_string(file_path)
        .await
        .map_err(|source| CommandError::SeedFile {
            path: file_path.display().to_string(),
            source,
        })?;

    tracing::info!(path = %file_path.display(), bytes = sql.len(), "Loaded seed file");

    let pool = connect().await?;
    let mut tx = pool.begin().await?;
    sqlx::raw_sql(&sql).execute(&mut *tx).await?;
    tx.commit().await?;

    tracing::info!("Seeding complete!");
    pool.close().await;
    Ok(())
}
