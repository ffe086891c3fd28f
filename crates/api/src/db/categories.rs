//! Category repository.

use sqlx::PgPool;

use comparebuddy_core::MainCategoryId;

use super::{FilterQuery, RepositoryError};
use crate::models::{Category, MainCategory};

/// Repository for the two-level category taxonomy.
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all main categories ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[tracing::instrument(skip(self))]
    pub async fn list_main(&self) -> Result<Vec<MainCategory>, RepositoryError> {
        let rows = sqlx::query_as::<_, MainCategory>(
            r"
            SELECT id, name, name_en, icon_name
            FROM main_categories
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// List sub-categories ordered by id, optionally under one main category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[tracing::instrument(skip(self))]
    pub async fn list_sub(
        &self,
        main_category_id: Option<MainCategoryId>,
    ) -> Result<Vec<Category>, RepositoryError> {
        let mut query =
            FilterQuery::new("SELECT id, main_category_id, name, name_en FROM categories WHERE 1=1");
        query
            .eq("main_category_id", main_category_id)
            .order_by("id");

        Ok(query.fetch_all(self.pool).await?)
    }
}
