#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Network-free fallback scoring.
//!
//! Scores are built from length, vocabulary overlap with the model answer,
//! and sentence count. This is a crude proxy for quality and every result is
//! labelled as basic grading in its feedback.

use std::collections::HashSet;

use super::results::{BASIC_GRADING_NOTE, GradingRequest, GradingResult};

/// Highest possible sum of the four sub-scores.
const RUBRIC_TOTAL: f64 = 7.5;

/// Sub-scores computed for a non-empty answer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rubric {
    /// Vocabulary overlap with the model answer, 0 to 2.
    pub accuracy:      f64,
    /// Answer length, 0 to 2.
    pub completeness:  f64,
    /// Sentence structure, 0 to 2.
    pub understanding: f64,
    /// Sentence structure, 0 to 1.5.
    pub clarity:       f64,
}

impl Rubric {
    /// Sum of all sub-scores.
    pub fn total(&self) -> f64 {
        self.accuracy + self.completeness + self.understanding + self.clarity
    }
}

/// Lowercased whitespace-separated tokens, duplicates collapsed.
fn words(text: &str) -> HashSet<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Scores answer length in characters.
fn completeness(answer: &str) -> f64 {
    match answer.chars().count() {
        n if n > 100 => 2.0,
        n if n > 50 => 1.5,
        n if n > 10 => 1.0,
        _ => 0.0,
    }
}

/// Scores the share of model-answer words the student also used.
fn accuracy(model_answer: &str, answer: &str) -> f64 {
    if model_answer.trim().is_empty() {
        return 0.0;
    }

    let expected = words(model_answer);
    let given = words(answer);
    let ratio = expected.intersection(&given).count() as f64 / expected.len() as f64;

    if ratio > 0.5 {
        2.0
    } else if ratio > 0.2 {
        1.0
    } else {
        0.0
    }
}

/// Computes the four sub-scores for a trimmed, non-empty answer.
pub fn rubric(model_answer: &str, answer: &str) -> Rubric {
    let segments = answer.split('.').count();
    let (understanding, clarity) = match segments {
        n if n > 2 => (2.0, 1.5),
        n if n > 1 => (1.0, 1.0),
        _ => (0.0, 0.0),
    };

    Rubric {
        accuracy: accuracy(model_answer, answer),
        completeness: completeness(answer),
        understanding,
        clarity,
    }
}

/// Rounds to one decimal place.
fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Grades an answer without any provider.
pub fn grade(request: &GradingRequest) -> GradingResult {
    let answer = request.student_answer().trim();
    let max_marks = request.max_marks();

    if answer.is_empty() {
        return GradingResult::new(0.0, format!("No answer provided. {BASIC_GRADING_NOTE}"), max_marks);
    }

    let rubric = rubric(request.model_answer(), answer);
    tracing::debug!("Basic grading rubric: {rubric:?}");

    let score = round_tenth(rubric.total() / RUBRIC_TOTAL * max_marks);
    GradingResult::new(score, BASIC_GRADING_NOTE, max_marks)
}
