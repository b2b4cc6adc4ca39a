#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::ops::RangeInclusive;

use bon::Builder;
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Marks a single question may carry.
pub const MARKS_RANGE: RangeInclusive<u32> = 1..=100;
/// Minimum word counts a question may require; 0 means no minimum.
pub const WORD_LIMIT_RANGE: RangeInclusive<u32> = 0..=1000;

/// Reasons an authoring change is rejected.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum AssessmentError {
    /// The question text was blank.
    #[error("Please enter a question before submitting.")]
    EmptyQuestion,
    /// Marks were outside the allowed range.
    #[error("Marks must be between 1 and 100, got {0}.")]
    InvalidMarks(u32),
    /// The minimum word count was outside the allowed range.
    #[error("Minimum word limit must be between 0 and 1000, got {0}.")]
    InvalidWordLimit(u32),
    /// No question has that number.
    #[error("Question {0} does not exist.")]
    NoSuchQuestion(usize),
    /// No assessment has that title.
    #[error("No assessment titled `{0}`.")]
    UnknownAssessment(String),
    /// The title was blank.
    #[error("Please enter an assessment title.")]
    EmptyTitle,
}

/// Current local time, as stored in the document.
pub(crate) fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// A free-text question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[builder(on(String, into))]
pub struct Question {
    /// Unique identifier.
    #[builder(default = Uuid::new_v4().to_string())]
    pub id:           String,
    /// The question text.
    pub text:         String,
    /// Maximum marks.
    pub marks:        u32,
    /// The teacher's model answer, or empty.
    #[serde(default)]
    #[builder(default)]
    pub model_answer: String,
    /// Minimum word count for answers; 0 means unconstrained.
    #[serde(default)]
    #[builder(default)]
    pub word_limit:   u32,
    /// When the question was added.
    #[builder(default = now())]
    pub created_at:   NaiveDateTime,
}

impl Question {
    /// Checks the authoring constraints.
    pub fn validate(&self) -> Result<(), AssessmentError> {
        if self.text.trim().is_empty() {
            return Err(AssessmentError::EmptyQuestion);
        }
        if !MARKS_RANGE.contains(&self.marks) {
            return Err(AssessmentError::InvalidMarks(self.marks));
        }
        if !WORD_LIMIT_RANGE.contains(&self.word_limit) {
            return Err(AssessmentError::InvalidWordLimit(self.word_limit));
        }
        Ok(())
    }
}

/// A titled set of questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// Unique identifier.
    pub id:          String,
    /// Title, also the key in the store.
    pub title:       String,
    /// Questions in presentation order.
    #[serde(default)]
    pub questions:   Vec<Question>,
    /// Sum of question marks.
    #[serde(default)]
    pub total_marks: u32,
    /// When the assessment was created.
    pub created_at:  NaiveDateTime,
}

impl Assessment {
    /// Creates an empty assessment.
    pub fn new(title: impl Into<String>) -> Result<Self, AssessmentError> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(AssessmentError::EmptyTitle);
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            title,
            questions: Vec::new(),
            total_marks: 0,
            created_at: now(),
        })
    }

    /// Appends a question after trimming its text and model answer.
    pub fn add_question(&mut self, mut question: Question) -> Result<&Question, AssessmentError> {
        question.text = question.text.trim().to_string();
        question.model_answer = question.model_answer.trim().to_string();
        question.validate()?;

        self.total_marks += question.marks;
        self.questions.push(question);
        tracing::info!(
            "Added question {} to `{}`; running total {} marks",
            self.questions.len(),
            self.title,
            self.total_marks
        );
        Ok(&self.questions[self.questions.len() - 1])
    }

    /// Removes the question with the given 1-based number.
    pub fn remove_question(&mut self, number: usize) -> Result<Question, AssessmentError> {
        if number == 0 || number > self.questions.len() {
            return Err(AssessmentError::NoSuchQuestion(number));
        }

        let removed = self.questions.remove(number - 1);
        self.total_marks = self.total_marks.saturating_sub(removed.marks);
        Ok(removed)
    }

    /// Removes every question.
    pub fn clear(&mut self) {
        self.questions.clear();
        self.total_marks = 0;
    }
}
