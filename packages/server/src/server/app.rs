//! Application setup and server configuration.

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::{advertisers, contents, health_handler, notifications, preview};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: ServerDeps,
}

/// Build the Axum application router
///
/// `allowed_origins` empty means any origin is accepted (development).
pub fn build_app(deps: ServerDeps, allowed_origins: Vec<String>) -> Router {
    let jwt_service = deps.jwt_service.clone();
    let app_state = AppState { deps };

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);
    let cors = if allowed_origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        cors.allow_origin(origins)
    };

    Router::new()
        .route("/health", get(health_handler))
        // Operator routes (AuthUser extractor rejects missing sessions)
        .route(
            "/advertisers",
            post(advertisers::create_advertiser).get(advertisers::list_advertisers),
        )
        .route(
            "/advertisers/:id",
            get(advertisers::get_advertiser).patch(advertisers::update_advertiser),
        )
        .route(
            "/contents",
            post(contents::create_content).get(contents::list_contents),
        )
        .route("/contents/generate", post(contents::generate_content))
        .route(
            "/contents/:id",
            get(contents::get_content)
                .patch(contents::update_content)
                .delete(contents::delete_content),
        )
        .route("/contents/:id/confirm", post(contents::request_confirm))
        .route("/contents/:id/publish", post(contents::publish_content))
        .route("/notifications", get(notifications::list_notifications))
        .route("/notifications/:id/read", post(notifications::mark_read))
        // Advertiser-facing routes, authorized by the preview token alone
        .route("/preview/:token", get(preview::get_preview))
        .route("/preview/:token/respond", post(preview::respond))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service.clone(), req, next)
        }))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
