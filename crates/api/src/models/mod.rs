//! Domain models for the API.
//!
//! Row types derive `sqlx::FromRow` and serialize straight to the JSON wire
//! shape. Response envelopes that only exist on the HTTP side live with
//! their handlers.

pub mod car;
pub mod catalog;
pub mod user;

pub use car::{
    CarBrand, CarBrandWithModels, CarModel, CarModelWithVariants, CarVariant, CarVariantSummary,
    VariantBrowseResult, VariantSearchResult,
};
pub use catalog::{Category, Item, MainCategory};
pub use user::User;
