//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /api/health                 - Liveness probe
//! GET  /api/health/ready           - Readiness probe (database ping)
//!
//! # Catalog
//! GET  /api/categories/main        - Main categories
//! GET  /api/categories/sub         - Sub-categories (?main_category_id=)
//! GET  /api/items                  - Items (?category_id=&brand=&field=)
//! GET  /api/items/meta/brands      - Distinct brands (?category_id=)
//! GET  /api/items/meta/fields      - Distinct fields (?category_id=)
//!
//! # Auth
//! POST /api/auth/register          - Password registration
//! POST /api/auth/login             - Password login
//! POST /api/auth/google            - Google ID token login
//!
//! # Cars
//! GET  /api/cars/brands            - Brands
//! GET  /api/cars/brands/{id}       - Brand with its models
//! GET  /api/cars/models            - Models (?brand_id=&powertrain_type=&body_type=&segment=)
//! GET  /api/cars/models/{id}       - Model with its variant summaries
//! GET  /api/cars/variants/{id}     - Full variant specification
//! GET  /api/cars/compare           - 2-4 full specifications (?ids=1,3,6)
//! GET  /api/cars/search            - Name search (?q=)
//! GET  /api/cars/browse            - Priced variants (?min_price=&max_price=&...)
//! ```

pub mod auth;
pub mod cars;
pub mod categories;
pub mod health;
pub mod items;

use std::time::Duration;

use axum::http::{HeaderName, Method, header};
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Common prefix of every route.
pub const API_PREFIX: &str = "/api";

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/main", get(categories::main_categories))
        .route("/sub", get(categories::sub_categories))
}

/// Create the item routes router.
pub fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(items::index))
        .route("/meta/brands", get(items::brands))
        .route("/meta/fields", get(items::fields))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/google", post(auth::google))
}

/// Create the car routes router.
pub fn car_routes() -> Router<AppState> {
    Router::new()
        .route("/brands", get(cars::brands))
        .route("/brands/{id}", get(cars::brand))
        .route("/models", get(cars::models))
        .route("/models/{id}", get(cars::model))
        .route("/variants/{id}", get(cars::variant))
        .route("/compare", get(cars::compare))
        .route("/search", get(cars::search))
        .route("/browse", get(cars::browse))
}

/// Create all routes under [`API_PREFIX`].
pub fn routes() -> Router<AppState> {
    let api = Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/categories", category_routes())
        .nest("/items", item_routes())
        .nest("/auth", auth_routes())
        .nest("/cars", car_routes());

    Router::new().nest(API_PREFIX, api)
}

/// Open CORS policy: any origin, fixed method and header allowlists.
#[must_use]
pub fn cors_layer() -> CorsLayer {
    const ALLOWED_HEADERS: [HeaderName; 3] = [header::ORIGIN, header::CONTENT_TYPE, header::ACCEPT];

    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(ALLOWED_HEADERS)
}

/// Build the complete application: routes, state and middleware.
///
/// # Middleware Order (outermost first)
///
/// 1. Sentry hub and HTTP transaction
/// 2. CORS
/// 3. `TraceLayer` (one `http_request` span per request)
/// 4. Request ID (recorded on that span)
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .layer(cors_layer())
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use secrecy::SecretString;
    use serde_json::{Value, json};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::config::{ApiConfig, GoogleConfig, LogFormat};
    use crate::services::auth::google::tests::{spawn_tokeninfo_stub, stub_config};

    /// An app whose pool never connects; every request below is answered
    /// before the database is touched.
    fn test_app(google: GoogleConfig) -> Router {
        let url = "postgres://comparebuddy@127.0.0.1:1/unreachable";
        let config = ApiConfig {
            database_url: SecretString::from(url),
            db_max_connections: 1,
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            google,
            log_format: LogFormat::Text,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        };
        let pool = PgPoolOptions::new().connect_lazy(url).unwrap();
        app(AppState::new(&config, pool).unwrap())
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(test_app(GoogleConfig::default()), get("/api/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "OK", "message": "API is running" }));
    }

    #[tokio::test]
    async fn test_compare_rejections() {
        let cases = [
            ("/api/cars/compare", "ids parameter is required (e.g. ?ids=1,3,6)"),
            ("/api/cars/compare?ids=", "ids parameter is required (e.g. ?ids=1,3,6)"),
            ("/api/cars/compare?ids=7", "Compare 2-4 variants (e.g. ?ids=1,3)"),
            ("/api/cars/compare?ids=1,2,3,4,5", "Compare 2-4 variants (e.g. ?ids=1,3)"),
            ("/api/cars/compare?ids=1,x", "Invalid variant id: 'x'"),
        ];
        for (uri, message) in cases {
            let (status, body) = send(test_app(GoogleConfig::default()), get(uri)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["error"], message, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_search_requires_q() {
        for uri in ["/api/cars/search", "/api/cars/search?q=", "/api/cars/search?q=%20%20"] {
            let (status, body) = send(test_app(GoogleConfig::default()), get(uri)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["error"], "q parameter is required");
        }
    }

    #[tokio::test]
    async fn test_non_numeric_path_ids_are_not_found() {
        let cases = [
            ("/api/cars/brands/abc", "Brand not found"),
            ("/api/cars/models/abc", "Model not found"),
            ("/api/cars/variants/abc", "Variant not found"),
        ];
        for (uri, message) in cases {
            let (status, body) = send(test_app(GoogleConfig::default()), get(uri)).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(body["error"], message);
        }
    }

    #[tokio::test]
    async fn test_malformed_query_value() {
        let (status, body) = send(
            test_app(GoogleConfig::default()),
            get("/api/items?category_id=three"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid query parameters");
    }

    #[tokio::test]
    async fn test_register_validation() {
        let (status, body) = send(
            test_app(GoogleConfig::default()),
            post_json("/api/auth/register", r#"{"username":"alice","password":"12345"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Password must be at least 6 characters");

        let (status, body) = send(
            test_app(GoogleConfig::default()),
            post_json("/api/auth/register", r#"{"username":"  ","password":"secret1"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Username and password are required");
    }

    #[tokio::test]
    async fn test_login_requires_credentials() {
        let (status, body) = send(
            test_app(GoogleConfig::default()),
            post_json("/api/auth/login", r#"{"username":"alice"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Username and password are required");
    }

    #[tokio::test]
    async fn test_invalid_json_body() {
        let (status, body) = send(
            test_app(GoogleConfig::default()),
            post_json("/api/auth/login", "{not json"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid request body");
    }

    #[tokio::test]
    async fn test_google_requires_token() {
        let (status, body) = send(
            test_app(GoogleConfig::default()),
            post_json("/api/auth/google", "{}"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "ID token is required");
    }

    #[tokio::test]
    async fn test_google_rejected_token() {
        let google = stub_config(spawn_tokeninfo_stub().await);
        let (status, body) = send(
            test_app(google),
            post_json("/api/auth/google", r#"{"id_token":"forged"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid Google token");
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/api/cars/brands")
            .header("origin", "https://app.example.com")
            .header("access-control-request-method", "GET")
            .body(Body::empty())
            .unwrap();
        let response = test_app(GoogleConfig::default()).oneshot(request).await.unwrap();

        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        let methods = response.headers()["access-control-allow-methods"]
            .to_str()
            .unwrap()
            .to_string();
        for method in ["GET", "POST", "PUT", "DELETE"] {
            assert!(methods.contains(method), "{methods}");
        }
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let request = Request::builder()
            .uri("/api/health")
            .header(crate::middleware::REQUEST_ID_HEADER, "probe-42")
            .body(Body::empty())
            .unwrap();
        let response = test_app(GoogleConfig::default()).oneshot(request).await.unwrap();
        assert_eq!(response.headers()[crate::middleware::REQUEST_ID_HEADER], "probe-42");
    }
}
