#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Student attempts: validation, grading and reporting.
pub mod attempt;
/// Questions and assessments.
pub mod model;
/// JSON-file persistence.
pub mod store;

pub use attempt::{AttemptReport, QuestionOutcome, Standing, Submission, SubmissionError};
pub use model::{Assessment, AssessmentError, Question};
pub use store::AssessmentStore;
