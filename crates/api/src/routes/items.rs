//! Item route handlers.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use tracing::instrument;

use comparebuddy_core::CategoryId;

use crate::db::ItemRepository;
use crate::db::items::ItemFilter;
use crate::error::Result;
use crate::extract::{ApiQuery, empty_string_as_none};
use crate::models::Item;
use crate::state::AppState;

/// Item listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ItemQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub category_id: Option<CategoryId>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub brand: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub field: Option<String>,
}

/// Query parameters of the distinct brand/field listings.
#[derive(Debug, Deserialize)]
pub struct ItemMetaQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub category_id: Option<CategoryId>,
}

/// List items, filtered by category, brand substring and field.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ItemQuery>,
) -> Result<Json<Vec<Item>>> {
    let filter = ItemFilter {
        category_id: query.category_id,
        brand: query.brand,
        field: query.field,
    };
    let items = ItemRepository::new(state.pool()).list(&filter).await?;
    Ok(Json(items))
}

/// List distinct brands.
#[instrument(skip(state))]
pub async fn brands(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ItemMetaQuery>,
) -> Result<Json<Vec<String>>> {
    let brands = ItemRepository::new(state.pool())
        .distinct_brands(query.category_id)
        .await?;
    Ok(Json(brands))
}

/// List distinct non-empty fields.
#[instrument(skip(state))]
pub async fn fields(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ItemMetaQuery>,
) -> Result<Json<Vec<String>>> {
    let fields = ItemRepository::new(state.pool())
        .distinct_fields(query.category_id)
        .await?;
    Ok(Json(fields))
}
