//! Category route handlers.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use tracing::instrument;

use comparebuddy_core::MainCategoryId;

use crate::db::CategoryRepository;
use crate::error::Result;
use crate::extract::{ApiQuery, empty_string_as_none};
use crate::models::{Category, MainCategory};
use crate::state::AppState;

/// Sub-category listing query parameters.
#[derive(Debug, Deserialize)]
pub struct SubCategoryQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub main_category_id: Option<MainCategoryId>,
}

/// List main categories.
#[instrument(skip(state))]
pub async fn main_categories(State(state): State<AppState>) -> Result<Json<Vec<MainCategory>>> {
    let categories = CategoryRepository::new(state.pool()).list_main().await?;
    Ok(Json(categories))
}

/// List sub-categories, optionally under one main category.
#[instrument(skip(state))]
pub async fn sub_categories(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SubCategoryQuery>,
) -> Result<Json<Vec<Category>>> {
    let categories = CategoryRepository::new(state.pool())
        .list_sub(query.main_category_id)
        .await?;
    Ok(Json(categories))
}
