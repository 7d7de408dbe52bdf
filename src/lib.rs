pub mod config;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod feed;
pub mod geocode;
pub mod models;
pub mod routes;
pub mod state;
pub mod views;

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use sqlx::PgPool;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::geocode::Geocoder;
use crate::state::{AppState, SharedState};

/// Assemble the router and spawn the change feed listener and the
/// dashboard state task. Must run inside a Tokio runtime.
pub fn build_app(pool: PgPool, config: Config) -> (Router, SharedState) {
    let geocoder = config
        .geocoding_api_key
        .as_ref()
        .map(|key| Geocoder::new(config.geocoding_base_url.clone(), key.clone()));
    if geocoder.is_none() {
        tracing::warn!("GEOCODING_API_KEY not set; submissions will be stored without coordinates");
    }

    let feed = feed::channel();
    feed::spawn_listener(pool.clone(), feed.clone());
    let dashboard = dashboard::spawn(pool.clone(), feed.clone());

    let state: SharedState = Arc::new(AppState {
        pool,
        config,
        geocoder,
        feed,
        dashboard,
    });

    let app = Router::new()
        .merge(routes::webhook_routes())
        .merge(routes::api_routes())
        .merge(views::view_routes())
        .nest_service("/static", ServeDir::new("static"))
        .route("/health", axum::routing::get(health))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state.clone());

    (app, state)
}

async fn health() -> &'static str {
    "ok"
}
