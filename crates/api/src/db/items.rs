//! Item repository.

use sqlx::PgPool;

use comparebuddy_core::CategoryId;

use super::{FilterQuery, RepositoryError};
use crate::models::Item;

const ITEM_SELECT: &str = "SELECT id, category_id, brand, name, duration, price, \
                           COALESCE(field, '') AS field FROM items WHERE 1=1";

/// Optional filters for the item listing.
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    /// Exact category.
    pub category_id: Option<CategoryId>,
    /// Case-insensitive substring of the brand.
    pub brand: Option<String>,
    /// Exact field tag.
    pub field: Option<String>,
}

/// Repository for generic catalog items.
pub struct ItemRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ItemRepository<'a> {
    /// Create a new item repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List items matching `filter`, ordered by brand then price.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, filter: &ItemFilter) -> Result<Vec<Item>, RepositoryError> {
        Ok(list_query(filter).fetch_all(self.pool).await?)
    }

    /// Distinct brands, optionally within one category, ordered by brand.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[tracing::instrument(skip(self))]
    pub async fn distinct_brands(
        &self,
        category_id: Option<CategoryId>,
    ) -> Result<Vec<String>, RepositoryError> {
        let mut query = FilterQuery::new("SELECT DISTINCT brand FROM items WHERE 1=1");
        query.eq("category_id", category_id).order_by("brand");

        let rows: Vec<(String,)> = query.fetch_all(self.pool).await?;
        Ok(rows.into_iter().map(|(brand,)| brand).collect())
    }

    /// Distinct non-empty field tags, optionally within one category,
    /// ordered by field.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[tracing::instrument(skip(self))]
    pub async fn distinct_fields(
        &self,
        category_id: Option<CategoryId>,
    ) -> Result<Vec<String>, RepositoryError> {
        let mut query = FilterQuery::new(
            "SELECT DISTINCT field FROM items WHERE field IS NOT NULL AND field <> ''",
        );
        query.eq("category_id", category_id).order_by("field");

        let rows: Vec<(String,)> = query.fetch_all(self.pool).await?;
        Ok(rows.into_iter().map(|(field,)| field).collect())
    }
}

fn list_query(filter: &ItemFilter) -> FilterQuery<'_> {
    let mut query = FilterQuery::new(ITEM_SELECT);
    query
        .eq("category_id", filter.category_id)
        .contains("brand", filter.brand.as_deref())
        .eq("field", filter.field.as_deref())
        .order_by("brand, price");
    query
}
