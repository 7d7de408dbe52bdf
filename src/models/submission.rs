use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One form-intake record. The store assigns `id`, `created_at`, and
/// `updated_at`; coordinates are present only when geocoding succeeded,
/// and always as a pair.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub type_of_place: String,
    pub retention_days: String,
    pub status: String,
    pub notes: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Submission {
    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

/// Fields the webhook collects for an insert. Email is not part of the
/// webhook contract; the store defaults it to an empty string.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub name: String,
    pub phone: Option<String>,
    pub address: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub type_of_place: String,
    pub retention_days: String,
    pub status: String,
    pub notes: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

pub const DEFAULT_STATUS: &str = "pending";

/// The four conventional status values. Storage is permissive (any
/// string persists as-is); display derives one of these, falling back
/// to `Pending` for unknown values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Pending,
    Approved,
    Rejected,
    Completed,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Pending,
        Status::Approved,
        Status::Rejected,
        Status::Completed,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(Status::Pending),
            "approved" => Some(Status::Approved),
            "rejected" => Some(Status::Rejected),
            "completed" => Some(Status::Completed),
            _ => None,
        }
    }

    /// Display fallback for out-of-range stored values.
    pub fn from_raw(raw: &str) -> Self {
        Status::parse(raw).unwrap_or(Status::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Approved => "approved",
            Status::Rejected => "rejected",
            Status::Completed => "completed",
        }
    }

    pub fn marker_color(&self) -> &'static str {
        match self {
            Status::Pending => "#fbbf24",
            Status::Approved => "#10b981",
            Status::Rejected => "#ef4444",
            Status::Completed => "#3b82f6",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            Status::Pending => "badge badge-pending",
            Status::Approved => "badge badge-approved",
            Status::Rejected => "badge badge-rejected",
            Status::Completed => "badge badge-completed",
        }
    }
}
