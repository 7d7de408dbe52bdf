use crate::feed::ChangeEvent;
use crate::models::Submission;

/// The in-memory submission list. Owned by the dashboard task; the
/// store remains the source of truth and this is a read-only copy kept
/// in sync by feed events.
#[derive(Debug, Default)]
pub struct SubmissionCache {
    items: Vec<Submission>,
}

impl SubmissionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with the initial bulk read (newest first).
    pub fn load(&mut self, items: Vec<Submission>) {
        self.items = items;
    }

    /// Patch the list with one feed event: insert prepends, update
    /// replaces the first row with a matching id in place, delete
    /// removes the matching row. Events for unknown ids are no-ops.
    pub fn apply(&mut self, event: ChangeEvent) {
        match event {
            ChangeEvent::Insert { new } => {
                self.items.insert(0, new);
            }
            ChangeEvent::Update { new } => {
                if let Some(slot) = self.items.iter_mut().find(|s| s.id == new.id) {
                    *slot = new;
                }
            }
            ChangeEvent::Delete { old } => {
                self.items.retain(|s| s.id != old.id);
            }
        }
    }

    pub fn items(&self) -> &[Submission] {
        &self.items
    }
}
