//! Request extractors that reject with the API's JSON error body.
//!
//! axum's own `Json` and `Query` rejections answer with plain text and, for
//! JSON bodies, a 415/422 status. Every malformed request here is a 400
//! with `{"error": ...}` instead.

use std::fmt;
use std::str::FromStr;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::{Deserialize, Deserializer};

use crate::error::AppError;

/// JSON body extractor; any rejection becomes 400 "Invalid request body".
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(rejection = %rejection.body_text(), "Rejected request body");
                Err(AppError::BadRequest("Invalid request body".to_string()))
            }
        }
    }
}

/// Query-string extractor; any rejection becomes 400 "Invalid query parameters".
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(rejection = %rejection.body_text(), "Rejected query string");
                Err(AppError::BadRequest("Invalid query parameters".to_string()))
            }
        }
    }
}

/// Deserialize an optional query value, treating an empty (or blank) string
/// as absent.
///
/// Use with `#[serde(default, deserialize_with = "empty_string_as_none")]`.
///
/// # Errors
///
/// Returns a deserialization error if a non-empty value fails to parse as `T`.
pub fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
