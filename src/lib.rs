use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod models;
pub mod streaks;

use config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let mut allowed_origins = vec![state.config.frontend_url.parse::<HeaderValue>()?];
    for origin in &state.config.cors_extra_origins {
        match origin.parse::<HeaderValue>() {
            Ok(hv) => allowed_origins.push(hv),
            Err(_) => tracing::warn!(origin = %origin, "Ignoring invalid CORS origin"),
        }
    }

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .allow_credentials(true);

    let router = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            "/api/streaks/compute",
            post(handlers::streaks::compute_streak),
        )
        .route(
            "/api/streaks/toggle",
            post(handlers::streaks::toggle_streak),
        )
        .route(
            "/api/streaks/rollover",
            post(handlers::streaks::rollover_streak),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(router)
}
