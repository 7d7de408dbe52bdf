use std::cmp::Ordering;

use crate::models::Submission;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Email,
    Status,
    CreatedAt,
}

impl SortField {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "name" => SortField::Name,
            "email" => SortField::Email,
            "status" => SortField::Status,
            _ => SortField::CreatedAt,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Email => "email",
            SortField::Status => "status",
            SortField::CreatedAt => "created_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(raw: &str) -> Self {
        if raw == "asc" {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    fn flip(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// The table's active sort. Clicking the active field toggles the
/// direction; clicking another field switches to it ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        SortState {
            field: SortField::CreatedAt,
            direction: SortDirection::Desc,
        }
    }
}

impl SortState {
    pub fn from_params(field: &str, order: &str) -> Self {
        SortState {
            field: SortField::parse(field),
            direction: SortDirection::parse(order),
        }
    }

    pub fn click(&self, field: SortField) -> SortState {
        if self.field == field {
            SortState {
                field,
                direction: self.direction.flip(),
            }
        } else {
            SortState {
                field,
                direction: SortDirection::Asc,
            }
        }
    }
}

/// Sort in place: string fields case-insensitively, `created_at` by
/// instant. The sort is stable, so toggling direction exactly reverses
/// lists without duplicate keys.
pub fn sort(submissions: &mut [&Submission], field: SortField, direction: SortDirection) {
    submissions.sort_by(|a, b| {
        let ord = compare(a, b, field);
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

fn compare(a: &Submission, b: &Submission, field: SortField) -> Ordering {
    match field {
        SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortField::Email => a.email.to_lowercase().cmp(&b.email.to_lowercase()),
        SortField::Status => a.status.to_lowercase().cmp(&b.status.to_lowercase()),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}
