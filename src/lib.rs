//! # mark0
//!
//! Assessment authoring and grading. Teachers write free-text questions with
//! optional model answers; student answers are graded by LLM chat-completion
//! providers, with a deterministic heuristic when no provider can answer.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Questions, assessments, persistence and attempts
pub mod assessment;
/// Environment-driven runtime configuration
pub mod config;
/// Model-answer generation with offline fallbacks
pub mod generate;
/// Grading: response parsing, heuristic fallback, and the provider chain
pub mod grade;
/// Keyword-pattern plagiarism heuristic
pub mod plagiarism;
/// Prompt construction for grading and answer generation
pub mod prompts;
/// Chat-completion providers
pub mod provider;

pub use generate::{AnswerGenerator, AnswerSource, GeneratedAnswer};
pub use grade::{Grader, GradingRequest, GradingResult};
pub use provider::{ChatPrompt, ChatProvider, Provider, ProviderError};
