//! Car catalog route handlers.

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use comparebuddy_core::{CarBrandId, CarModelId, CarVariantId, Price};

use crate::db::CarRepository;
use crate::db::cars::{BrowseFilter, ModelFilter};
use crate::error::{AppError, Result};
use crate::extract::{ApiQuery, empty_string_as_none};
use crate::models::{
    CarBrand, CarBrandWithModels, CarModel, CarModelWithVariants, CarVariant,
    VariantBrowseResult, VariantSearchResult,
};
use crate::state::AppState;

/// Fewest variants a comparison accepts.
pub const MIN_COMPARE: usize = 2;

/// Most variants a comparison accepts.
pub const MAX_COMPARE: usize = 4;

/// Model listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ModelQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub brand_id: Option<CarBrandId>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub powertrain_type: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub body_type: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub segment: Option<String>,
}

/// Comparison query parameters.
#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    /// Comma-separated variant ids.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub ids: Option<String>,
}

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub q: Option<String>,
}

/// Browse query parameters.
#[derive(Debug, Deserialize)]
pub struct BrowseQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub min_price: Option<Price>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub max_price: Option<Price>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub powertrain_type: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub min_range: Option<i32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub min_fuel_efficiency: Option<f64>,
}

/// Comparison response.
#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub count: usize,
    pub variants: Vec<CarVariant>,
}

/// List all brands.
#[instrument(skip(state))]
pub async fn brands(State(state): State<AppState>) -> Result<Json<Vec<CarBrand>>> {
    let brands = CarRepository::new(state.pool()).list_brands().await?;
    Ok(Json(brands))
}

/// Brand detail with its models.
#[instrument(skip(state))]
pub async fn brand(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CarBrandWithModels>> {
    let not_found = || AppError::NotFound("Brand not found".to_string());
    let id: CarBrandId = id.parse().map_err(|_| not_found())?;

    let cars = CarRepository::new(state.pool());
    let brand = cars.get_brand(id).await?.ok_or_else(not_found)?;
    let models = cars.models_for_brand(id).await?;

    Ok(Json(CarBrandWithModels { brand, models }))
}

/// List models with their brand names.
#[instrument(skip(state))]
pub async fn models(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ModelQuery>,
) -> Result<Json<Vec<CarModel>>> {
    let filter = ModelFilter {
        brand_id: query.brand_id,
        powertrain_type: query.powertrain_type,
        body_type: query.body_type,
        segment: query.segment,
    };
    let models = CarRepository::new(state.pool()).list_models(&filter).await?;
    Ok(Json(models))
}

/// Model detail with its variant summaries.
#[instrument(skip(state))]
pub async fn model(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CarModelWithVariants>> {
    let not_found = || AppError::NotFound("Model not found".to_string());
    let id: CarModelId = id.parse().map_err(|_| not_found())?;

    let cars = CarRepository::new(state.pool());
    let model = cars.get_model(id).await?.ok_or_else(not_found)?;
    let variants = cars.variants_for_model(id).await?;

    Ok(Json(CarModelWithVariants { model, variants }))
}

/// Full specification of one variant.
#[instrument(skip(state))]
pub async fn variant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CarVariant>> {
    let not_found = || AppError::NotFound("Variant not found".to_string());
    let id: CarVariantId = id.parse().map_err(|_| not_found())?;

    let variant = CarRepository::new(state.pool())
        .get_variant(id)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(variant))
}

/// Full specifications of 2-4 variants.
#[instrument(skip(state))]
pub async fn compare(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CompareQuery>,
) -> Result<Json<CompareResponse>> {
    let ids = parse_compare_ids(query.ids.as_deref())?;

    let variants = CarRepository::new(state.pool())
        .compare_variants(&ids)
        .await?;
    if variants.is_empty() {
        return Err(AppError::NotFound("No variants found".to_string()));
    }

    Ok(Json(CompareResponse {
        count: variants.len(),
        variants,
    }))
}

/// Search variants by brand, model or variant name.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> Result<Json<Vec<VariantSearchResult>>> {
    let term = query
        .q
        .ok_or_else(|| AppError::BadRequest("q parameter is required".to_string()))?;

    let results = CarRepository::new(state.pool())
        .search_variants(&term)
        .await?;
    Ok(Json(results))
}

/// Browse priced variants by price range, powertrain, range and efficiency.
#[instrument(skip(state))]
pub async fn browse(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<BrowseQuery>,
) -> Result<Json<Vec<VariantBrowseResult>>> {
    let filter = BrowseFilter {
        min_price: query.min_price,
        max_price: query.max_price,
        powertrain_type: query.powertrain_type,
        min_range: query.min_range,
        min_fuel_efficiency: query.min_fuel_efficiency,
    };
    let results = CarRepository::new(state.pool())
        .browse_variants(&filter)
        .await?;
    Ok(Json(results))
}

/// Parse the `ids` parameter: 2-4 comma-separated ids, each trimmed.
fn parse_compare_ids(raw: Option<&str>) -> Result<Vec<CarVariantId>> {
    let raw = raw.ok_or_else(|| {
        AppError::BadRequest("ids parameter is required (e.g. ?ids=1,3,6)".to_string())
    })?;

    let parts: Vec<&str> = raw.split(',').collect();
    if !(MIN_COMPARE..=MAX_COMPARE).contains(&parts.len()) {
        return Err(AppError::BadRequest(
            "Compare 2-4 variants (e.g. ?ids=1,3)".to_string(),
        ));
    }

    parts
        .into_iter()
        .map(|part| {
            part.parse::<CarVariantId>()
                .map_err(|_| AppError::BadRequest(format!("Invalid variant id: '{}'", part.trim())))
        })
        .collect()
}
