pub mod language;
pub mod submission;

pub use language::Language;
pub use submission::{Submission, SubmissionPage, SubmissionSummary};
