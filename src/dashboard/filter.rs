use crate::models::Submission;

/// Status predicate: `all` matches everything, otherwise exact
/// equality against the stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(String),
}

impl StatusFilter {
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() || raw == "all" {
            StatusFilter::All
        } else {
            StatusFilter::Only(raw.to_string())
        }
    }

    pub fn matches(&self, submission: &Submission) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => submission.status == *status,
        }
    }
}

/// Search predicate: case-insensitive substring over name, email,
/// address, and phone. An empty term matches everything; an absent
/// phone is non-matching for that field only.
pub fn matches_search(submission: &Submission, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    submission.name.to_lowercase().contains(&needle)
        || submission.email.to_lowercase().contains(&needle)
        || submission.address.to_lowercase().contains(&needle)
        || submission
            .phone
            .as_deref()
            .is_some_and(|p| p.to_lowercase().contains(&needle))
}

/// The displayed subset: the intersection of the search and status
/// predicates, in source order.
pub fn filter<'a>(
    submissions: &'a [Submission],
    term: &str,
    status: &StatusFilter,
) -> Vec<&'a Submission> {
    submissions
        .iter()
        .filter(|s| matches_search(s, term) && status.matches(s))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use super::*;

    fn sub(n: u128, name: &str, email: &str, phone: Option<&str>, status: &str) -> Submission {
        Submission {
            id: Uuid::from_u128(n),
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.map(|p| p.to_string()),
            address: "12 Lake Rd, Monroe".to_string(),
            city: None,
            state: None,
            zip_code: None,
            type_of_place: String::new(),
            retention_days: String::new(),
            status: status.to_string(),
            notes: None,
            latitude: None,
            longitude: None,
            created_at: Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let alice = sub(1, "Alice", "alice@example.com", Some("555-0101"), "pending");

        assert!(matches_search(&alice, "ALICE"));
        assert!(matches_search(&alice, "example.COM"));
        assert!(matches_search(&alice, "lake rd"));
        assert!(matches_search(&alice, "555-01"));
        assert!(!matches_search(&alice, "bob"));
    }

    #[test]
    fn absent_phone_does_not_match_phone_searches() {
        let no_phone = sub(1, "Alice", "alice@example.com", None, "pending");
        assert!(!matches_search(&no_phone, "555"));
        assert!(matches_search(&no_phone, "alice"));
    }

    #[test]
    fn empty_term_returns_list_unchanged() {
        let list = vec![
            sub(1, "Alice", "", None, "pending"),
            sub(2, "Bob", "", None, "approved"),
        ];
        let filtered = filter(&list, "", &StatusFilter::All);
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn status_all_is_a_noop_filter() {
        let bob = sub(2, "Bob", "", None, "approved");
        assert!(StatusFilter::parse("all").matches(&bob));
        assert!(StatusFilter::parse("").matches(&bob));
        assert!(StatusFilter::parse("approved").matches(&bob));
        assert!(!StatusFilter::parse("pending").matches(&bob));
    }

    #[test]
    fn filters_compose_as_intersection() {
        let list = vec![
            sub(1, "Alice Smith", "", None, "pending"),
            sub(2, "Alice Jones", "", None, "approved"),
            sub(3, "Bob Smith", "", None, "approved"),
        ];

        let filtered = filter(&list, "alice", &StatusFilter::parse("approved"));
        let names: Vec<&str> = filtered.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Alice Jones"]);
    }

    #[test]
    fn searching_alice_matches_regardless_of_case() {
        let list = vec![
            sub(1, "Alice", "", None, "pending"),
            sub(2, "Bob", "", None, "approved"),
        ];
        let filtered = filter(&list, "aLiCe", &StatusFilter::All);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Alice");
    }
}
