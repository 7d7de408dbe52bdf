use askama::Template;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse};
use serde::Deserialize;

use crate::dashboard::filter::{self, StatusFilter};
use crate::dashboard::map::MapView;
use crate::dashboard::sort::{self, SortField, SortState};
use crate::models::{Status, Submission};
use crate::state::SharedState;

#[derive(Template)]
#[template(path = "dashboard/index.html")]
struct DashboardTemplate {
    loaded: bool,
    total: usize,
    rows: Vec<SubmissionRow>,
    search: String,
    status_options: Vec<StatusOption>,
    filters_active: bool,
    headers: Vec<HeaderCell>,
    map_data: String,
    maps_api_key: String,
    has_maps_key: bool,
}

struct SubmissionRow {
    name: String,
    phone: String,
    email: String,
    address: String,
    status: String,
    badge_class: &'static str,
    created_at: String,
}

struct StatusOption {
    value: String,
    label: String,
    selected: bool,
}

struct HeaderCell {
    label: &'static str,
    href: String,
    arrow: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct DashboardParams {
    pub search: Option<String>,
    pub status: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

pub async fn index(
    State(state): State<SharedState>,
    Query(params): Query<DashboardParams>,
) -> impl IntoResponse {
    let snapshot = state.dashboard.snapshot();

    let search = params.search.unwrap_or_default();
    let status_raw = params.status.unwrap_or_else(|| "all".to_string());
    let status = StatusFilter::parse(&status_raw);
    let sort_state = SortState::from_params(
        params.sort_by.as_deref().unwrap_or("created_at"),
        params.sort_order.as_deref().unwrap_or("desc"),
    );

    let total = snapshot.submissions.len();
    let mut filtered = filter::filter(&snapshot.submissions, &search, &status);
    sort::sort(&mut filtered, sort_state.field, sort_state.direction);

    let map_view = MapView::build(&filtered);
    // Keep a literal "</script>" out of the JSON island.
    let map_data = serde_json::to_string(&map_view)
        .unwrap_or_else(|_| "null".to_string())
        .replace('<', "\\u003c");

    let rows = filtered.iter().map(|s| row(s)).collect();
    let headers = header_cells(&search, &status_raw, sort_state);
    let status_options = status_options(&status_raw);
    let filters_active = !search.is_empty() || status_raw != "all";

    let template = DashboardTemplate {
        loaded: snapshot.loaded,
        total,
        rows,
        search,
        status_options,
        filters_active,
        headers,
        map_data,
        maps_api_key: state.config.maps_api_key.clone().unwrap_or_default(),
        has_maps_key: state.config.maps_api_key.is_some(),
    };
    Html(template.render().unwrap_or_default())
}

fn row(submission: &Submission) -> SubmissionRow {
    SubmissionRow {
        name: truncate(&submission.name, 20),
        phone: submission.phone.clone().unwrap_or_default(),
        email: truncate(&submission.email, 25),
        address: truncate(&submission.address, 25),
        status: submission.status.clone(),
        badge_class: Status::from_raw(&submission.status).badge_class(),
        created_at: submission.created_at.format("%Y-%m-%d %H:%M").to_string(),
    }
}

fn status_options(selected: &str) -> Vec<StatusOption> {
    let mut options = vec![StatusOption {
        value: "all".to_string(),
        label: "All Statuses".to_string(),
        selected: selected == "all" || selected.is_empty(),
    }];
    for status in Status::ALL {
        let value = status.as_str();
        let mut label: Vec<char> = value.chars().collect();
        label[0] = label[0].to_ascii_uppercase();
        options.push(StatusOption {
            value: value.to_string(),
            label: label.into_iter().collect(),
            selected: selected == value,
        });
    }
    options
}

fn header_cells(search: &str, status: &str, active: SortState) -> Vec<HeaderCell> {
    const COLUMNS: [(SortField, &str); 4] = [
        (SortField::Name, "Name"),
        (SortField::Email, "Email"),
        (SortField::Status, "Status"),
        (SortField::CreatedAt, "Date"),
    ];

    COLUMNS
        .iter()
        .map(|&(field, label)| {
            let next = active.click(field);
            let arrow = if active.field == field {
                match active.direction {
                    sort::SortDirection::Asc => "\u{25b2}",
                    sort::SortDirection::Desc => "\u{25bc}",
                }
            } else {
                ""
            };
            HeaderCell {
                label,
                href: query_string(search, status, next),
                arrow,
            }
        })
        .collect()
}

fn query_string(search: &str, status: &str, sort: SortState) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    if !search.is_empty() {
        serializer.append_pair("search", search);
    }
    if !status.is_empty() && status != "all" {
        serializer.append_pair("status", status);
    }
    serializer.append_pair("sort_by", sort.field.as_str());
    serializer.append_pair("sort_order", sort.direction.as_str());
    format!("/?{}", serializer.finish())
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max).collect();
        format!("{kept}...")
    }
}
