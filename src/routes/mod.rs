pub mod events;
pub mod submissions;
pub mod webhook;

use axum::routing::get;
use axum::Router;

use crate::state::SharedState;

pub fn webhook_routes() -> Router<SharedState> {
    Router::new().route("/webhook", get(webhook::liveness).post(webhook::receive))
}

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route("/api/v1/submissions", get(submissions::list))
        .route("/api/v1/map", get(submissions::map))
        .route("/api/v1/events", get(events::subscribe))
}
