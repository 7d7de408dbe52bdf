pub mod submission;

pub use submission::{NewSubmission, Status, Submission};
