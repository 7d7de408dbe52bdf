use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::broadcast;

use crate::config::Config;
use crate::dashboard::Dashboard;
use crate::feed::ChangeEvent;
use crate::geocode::Geocoder;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
    pub geocoder: Option<Geocoder>,
    pub feed: broadcast::Sender<ChangeEvent>,
    pub dashboard: Dashboard,
}
