//! Category and item catalog types.

use serde::Serialize;

use comparebuddy_core::{CategoryId, ItemId, MainCategoryId, Price};

/// Top-level category.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MainCategory {
    pub id: MainCategoryId,
    pub name: String,
    pub name_en: String,
    pub icon_name: String,
}

/// Second-level category under a [`MainCategory`].
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Category {
    pub id: CategoryId,
    pub main_category_id: MainCategoryId,
    pub name: String,
    pub name_en: String,
}

/// A generic catalog entry.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Item {
    pub id: ItemId,
    pub category_id: CategoryId,
    pub brand: String,
    pub name: String,
    /// Free-text duration (e.g. "12 months").
    pub duration: String,
    pub price: Price,
    /// Optional tag; empty string when unset.
    pub field: String,
}
