#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Extracts a score and feedback from free-form provider text.
//!
//! Providers are asked for a `Score:` / `Feedback:` layout but nothing
//! enforces it, so extraction degrades in a fixed order: the labelled score,
//! then the first bare number anywhere in the text, then zero. The result is
//! always clamped to the question's maximum marks.

use std::{num::ParseFloatError, sync::LazyLock};

use regex::Regex;

use super::results::GradingResult;

/// Feedback used when the text has no `Feedback:` section.
pub const NO_FEEDBACK: &str = "No detailed feedback provided";

/// `Score:` followed by a non-negative decimal.
static SCORE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"(?i)Score\s*:\s*([0-9]+(?:\.[0-9]+)?)"));

/// `Feedback:` followed by everything up to the end of the text.
static FEEDBACK: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"(?is)Feedback\s*:\s*(.*)"));

/// Any bare non-negative decimal.
static NUMBER: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"([0-9]+(?:\.[0-9]+)?)"));

/// Failures of the extraction machinery itself, as opposed to text that
/// simply lacks the expected layout.
#[derive(thiserror::Error, Debug, Clone)]
pub enum ParseError {
    /// A pattern failed to compile.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
    /// A matched number could not be read as a float.
    #[error("invalid number: {0}")]
    Number(#[from] ParseFloatError),
}

/// Returns the compiled pattern or the error it failed with.
fn pattern(re: &'static LazyLock<Result<Regex, regex::Error>>) -> Result<&'static Regex, ParseError> {
    re.as_ref().map_err(|e| ParseError::Pattern(e.clone()))
}

/// Returns the first capture group of `re` in `text`, if any.
fn capture<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Parses provider text, surfacing failures of the extraction machinery.
pub fn try_parse(raw: &str, max_marks: f64) -> Result<GradingResult, ParseError> {
    let labelled = capture(pattern(&SCORE)?, raw)
        .map(str::parse::<f64>)
        .transpose()?;

    let feedback = capture(pattern(&FEEDBACK)?, raw)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .unwrap_or(NO_FEEDBACK);

    let score = match labelled {
        Some(score) => score,
        None => capture(pattern(&NUMBER)?, raw)
            .map(str::parse::<f64>)
            .transpose()?
            .unwrap_or(0.0),
    };

    Ok(GradingResult::new(score.min(max_marks), feedback, max_marks))
}

/// Half-credit result for text whose extraction broke.
fn failed(err: &ParseError, max_marks: f64) -> GradingResult {
    GradingResult::new(
        max_marks * 0.5,
        format!("Error parsing grading response: {err}"),
        max_marks,
    )
}

/// Parses provider text into a result. Never fails: if extraction itself
/// breaks, the answer receives half marks with an explanatory note.
pub fn parse(raw: &str, max_marks: f64) -> GradingResult {
    match try_parse(raw, max_marks) {
        Ok(result) => result,
        Err(err) => {
            tracing::error!("Could not parse grading response: {err}");
            failed(&err, max_marks)
        }
    }
}
