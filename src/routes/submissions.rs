use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::dashboard::filter::{self, StatusFilter};
use crate::dashboard::map::MapView;
use crate::dashboard::sort::{self, SortState};
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub status: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// The filtered, sorted dashboard snapshot as JSON.
pub async fn list(
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Json<serde_json::Value> {
    let snapshot = state.dashboard.snapshot();

    let term = params.search.unwrap_or_default();
    let status = StatusFilter::parse(params.status.as_deref().unwrap_or("all"));
    let sort_state = SortState::from_params(
        params.sort_by.as_deref().unwrap_or("created_at"),
        params.sort_order.as_deref().unwrap_or("desc"),
    );

    let mut rows = filter::filter(&snapshot.submissions, &term, &status);
    sort::sort(&mut rows, sort_state.field, sort_state.direction);

    Json(serde_json::json!({
        "loaded": snapshot.loaded,
        "total": rows.len(),
        "submissions": rows,
    }))
}

/// The map view-model for the filtered list: markers, bounds, and the
/// default viewport. Sorting is irrelevant to the map.
pub async fn map(
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Json<MapView> {
    let snapshot = state.dashboard.snapshot();

    let term = params.search.unwrap_or_default();
    let status = StatusFilter::parse(params.status.as_deref().unwrap_or("all"));
    let rows = filter::filter(&snapshot.submissions, &term, &status);

    Json(MapView::build(&rows))
}
