//! Library Catalog
//!
//! Browse, filter and add book records kept in a document database, through
//! server-rendered HTML pages and a JSON API over the same collection.

use std::sync::Arc;

use axum::{
    extract::FromRef,
    http::Uri,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod web;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use repository::Repository;
use services::Services;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<Services>,
    /// Signs the flash-message cookie
    pub cookie_key: Key,
}

impl AppState {
    pub fn new(config: AppConfig, repository: Repository) -> Self {
        let cookie_key = Key::from(&Sha512::digest(config.auth.secret_key.as_bytes()));
        Self {
            config: Arc::new(config),
            services: Arc::new(Services::new(repository)),
            cookie_key,
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Books
        .route("/books", get(api::books::list_books).post(api::books::create_book));

    // Web pages
    let mut pages = Router::new()
        .route("/", get(web::books::index))
        .route("/add", get(web::books::add_form).post(web::books::add_book));

    if state.config.auth.enabled {
        tracing::info!("Authentication routes enabled");
        pages = pages.merge(web::auth::router());
    }

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .merge(pages)
        .nest("/api/v1", api_v1)
        .fallback(not_found)
        .with_state(state)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// JSON error under `/api/`, an HTML page everywhere else
async fn not_found(uri: Uri) -> Response {
    let error = AppError::NotFound(format!("No route for {}", uri.path()));
    if uri.path().starts_with("/api/") {
        error.into_response()
    } else {
        web::HtmlError(error).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use repository::MockBookStore;
    use tower::ServiceExt;

    fn app_over_failing_store() -> Router {
        let mut store = MockBookStore::new();
        store
            .expect_find()
            .returning(|_| Err(AppError::Internal("store unreachable".into())));
        store.expect_distinct_genres().returning(|| Ok(vec![]));

        let state = AppState::new(AppConfig::default(), Repository::new(Arc::new(store)));
        create_router(state)
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, String, String) {
        let response = router
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn store_failure_renders_html_page() {
        let (status, content_type, body) = get(app_over_failing_store(), "/").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(content_type.starts_with("text/html"));
        assert!(body.contains("<html"));
        assert!(!body.contains("store unreachable"));
    }

    #[tokio::test]
    async fn store_failure_returns_json_error() {
        let (status, content_type, body) = get(app_over_failing_store(), "/api/v1/books").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(content_type.starts_with("application/json"));
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(json.get("code").is_some());
        assert!(json.get("error").is_some());
        assert!(json.get("message").is_some());
    }

    #[tokio::test]
    async fn fallback_matches_the_surface() {
        let (status, content_type, _) = get(app_over_failing_store(), "/api/v1/nothing-here").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(content_type.starts_with("application/json"));

        let (status, content_type, body) = get(app_over_failing_store(), "/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(content_type.starts_with("text/html"));
        assert!(body.contains("<html"));
    }
}
