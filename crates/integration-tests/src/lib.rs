//! Black-box tests for the CompareBuddy API.
//!
//! # Running Tests
//!
//! ```bash
//! cb-cli migrate
//! cb-cli seed
//! cargo run -p comparebuddy-api &
//! cargo test -p comparebuddy-integration-tests -- --ignored
//! ```
//!
//! The server address comes from `API_BASE_URL` (default
//! `http://localhost:8080`). Tests assume the bundled catalog fixture is
//! loaded and create their own users with unique names.
//!
//! `tests/google.rs` starts its own server against `API_DATABASE_URL` with a
//! local token-info stub, so it needs no running API.

use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use uuid::Uuid;

/// Base URL of the running API, without the `/api` prefix.
#[must_use]
pub fn base_url() -> String {
    std::env::var("API_BASE_URL")
        .unwrap_or_else(|_| "http://localhost:8080".to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Absolute URL for an `/api` path such as `/cars/brands`.
#[must_use]
pub fn api_url(path: &str) -> String {
    format!("{}/api{path}", base_url())
}

/// HTTP client for the tests.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// A name no earlier test run has used, for usernames and emails.
#[must_use]
pub fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

/// Status and JSON body of a response.
///
/// # Panics
///
/// Panics if the body is not JSON.
pub async fn json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let body = response.json().await.expect("Response body is not JSON");
    (status, body)
}
