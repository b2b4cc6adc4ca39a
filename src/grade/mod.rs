#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Network-free fallback grader.
pub mod heuristic;
/// Provider chain with heuristic fallback.
pub mod orchestrator;
/// Score and feedback extraction from provider text.
pub mod parser;
/// Grading request and result types.
pub mod results;

pub use orchestrator::Grader;
pub use parser::{NO_FEEDBACK, ParseError};
pub use results::{BASIC_GRADING_NOTE, GradingRequest, GradingResult};
