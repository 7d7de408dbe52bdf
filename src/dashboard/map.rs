use serde::Serialize;
use uuid::Uuid;

use crate::models::{Status, Submission};

/// Continental-US center, used whenever there is nothing to fit.
pub const DEFAULT_CENTER: Position = Position { lat: 39.8283, lng: -98.5795 };
pub const DEFAULT_ZOOM: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

/// One map pin: submissions without a full coordinate pair get none.
#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    pub id: Uuid,
    pub position: Position,
    pub title: String,
    pub color: &'static str,
    pub info: MarkerInfo,
}

/// Content of the shared info popup.
#[derive(Debug, Clone, Serialize)]
pub struct MarkerInfo {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: String,
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    /// Smallest box containing every marker; `None` with zero markers.
    pub fn fit(markers: &[Marker]) -> Option<Bounds> {
        let mut positions = markers.iter().map(|m| m.position);
        let first = positions.next()?;
        let mut bounds = Bounds {
            south: first.lat,
            west: first.lng,
            north: first.lat,
            east: first.lng,
        };
        for p in positions {
            bounds.south = bounds.south.min(p.lat);
            bounds.north = bounds.north.max(p.lat);
            bounds.west = bounds.west.min(p.lng);
            bounds.east = bounds.east.max(p.lng);
        }
        Some(bounds)
    }
}

/// Everything the map renderer needs: markers for the filtered list,
/// bounds to fit when any exist, and the default viewport otherwise.
#[derive(Debug, Clone, Serialize)]
pub struct MapView {
    pub markers: Vec<Marker>,
    pub bounds: Option<Bounds>,
    pub center: Position,
    pub zoom: u8,
}

impl MapView {
    pub fn build(submissions: &[&Submission]) -> MapView {
        let markers: Vec<Marker> = submissions
            .iter()
            .filter_map(|s| marker(s))
            .collect();
        let bounds = Bounds::fit(&markers);
        MapView {
            markers,
            bounds,
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

fn marker(submission: &Submission) -> Option<Marker> {
    let (lat, lng) = match (submission.latitude, submission.longitude) {
        (Some(lat), Some(lng)) => (lat, lng),
        _ => return None,
    };
    Some(Marker {
        id: submission.id,
        position: Position { lat, lng },
        title: submission.name.clone(),
        color: Status::from_raw(&submission.status).marker_color(),
        info: MarkerInfo {
            name: submission.name.clone(),
            email: submission.email.clone(),
            phone: submission.phone.clone(),
            address: submission.address.clone(),
            status: submission.status.clone(),
        },
    })
}
