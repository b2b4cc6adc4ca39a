#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt::Display;

use bon::Builder;
use serde::Serialize;

use crate::prompts;
use crate::provider::ChatPrompt;

/// Marker appended to every result produced without a provider.
pub const BASIC_GRADING_NOTE: &str = "(Basic grading used - AI grading unavailable)";

/// One answer to be graded. Built per call and never persisted.
#[derive(Debug, Clone, Builder)]
#[builder(on(String, into))]
pub struct GradingRequest {
    /// The question text.
    question:       String,
    /// The teacher's model answer, or empty.
    #[builder(default)]
    model_answer:   String,
    /// The student's answer.
    student_answer: String,
    /// Maximum marks for the question.
    max_marks:      f64,
}

impl GradingRequest {
    /// Creates a request from its four parts.
    pub fn new(
        question: impl Into<String>,
        model_answer: impl Into<String>,
        student_answer: impl Into<String>,
        max_marks: f64,
    ) -> Self {
        Self {
            question: question.into(),
            model_answer: model_answer.into(),
            student_answer: student_answer.into(),
            max_marks,
        }
    }

    /// Returns the question text.
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Returns the model answer, which may be empty.
    pub fn model_answer(&self) -> &str {
        &self.model_answer
    }

    /// Returns the student's answer.
    pub fn student_answer(&self) -> &str {
        &self.student_answer
    }

    /// Returns the maximum marks.
    pub fn max_marks(&self) -> f64 {
        self.max_marks
    }

    /// Builds the provider prompt for this request.
    pub fn prompt(&self) -> ChatPrompt {
        prompts::grading_prompt(
            &self.question,
            &self.model_answer,
            &self.student_answer,
            self.max_marks,
        )
    }
}

/// Score and feedback for one answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradingResult {
    /// Awarded marks, always within `0..=max_marks`.
    score:     f64,
    /// Feedback shown to the student.
    feedback:  String,
    /// Maximum marks, echoed from the request.
    max_marks: f64,
}

impl GradingResult {
    /// Creates a result, clamping `score` into `0..=max_marks`.
    pub fn new(score: f64, feedback: impl Into<String>, max_marks: f64) -> Self {
        let max_marks = if max_marks.is_finite() { max_marks.max(0.0) } else { 0.0 };
        let score = if score.is_nan() { 0.0 } else { score.clamp(0.0, max_marks) };

        Self {
            score,
            feedback: feedback.into(),
            max_marks,
        }
    }

    /// Returns the awarded marks.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Returns the feedback text.
    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    /// Returns the maximum marks.
    pub fn max_marks(&self) -> f64 {
        self.max_marks
    }

    /// Whether this result came from the heuristic rather than a provider.
    pub fn is_degraded(&self) -> bool {
        self.feedback.contains(BASIC_GRADING_NOTE)
    }
}

impl Display for GradingResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}/{} - {}", self.score, self.max_marks, self.feedback)
    }
}
