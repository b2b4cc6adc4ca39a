#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use futures::future::join_all;
use itertools::Itertools;
use serde::Serialize;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Panel, Style, Width, object::Rows},
};

use super::model::Assessment;
use crate::{
    grade::{Grader, GradingRequest, GradingResult},
    plagiarism::{self, PlagiarismReport},
};

/// Reasons a submission cannot be graded yet.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SubmissionError {
    /// The number of answers does not match the number of questions.
    #[error("Expected {expected} answers, got {got}.")]
    AnswerCount {
        /// Questions in the assessment.
        expected: usize,
        /// Answers supplied.
        got:      usize,
    },
    /// Some questions were left blank (1-based numbers).
    #[error("Please answer all questions. Missing answers for question(s): {}", .0.iter().join(", "))]
    Unanswered(Vec<usize>),
    /// Some answers are shorter than the question's minimum (number, minimum).
    #[error(
        "The following questions do not meet the minimum word limit: {}",
        .0.iter().map(|(q, w)| format!("Q{q} (min {w} words)")).join(", ")
    )]
    BelowWordLimit(Vec<(usize, u32)>),
}

/// Number of whitespace-separated words in `text`.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// A student's answers to one assessment, in question order.
#[derive(Debug, Clone)]
pub struct Submission<'a> {
    /// The assessment being attempted.
    assessment: &'a Assessment,
    /// One answer per question.
    answers:    Vec<String>,
}

impl<'a> Submission<'a> {
    /// Pairs answers with an assessment and checks they can be graded.
    pub fn new(assessment: &'a Assessment, answers: Vec<String>) -> Result<Self, SubmissionError> {
        if answers.len() != assessment.questions.len() {
            return Err(SubmissionError::AnswerCount {
                expected: assessment.questions.len(),
                got:      answers.len(),
            });
        }

        let mut unanswered = Vec::new();
        let mut below_limit = Vec::new();
        for (i, (question, answer)) in assessment.questions.iter().zip(&answers).enumerate() {
            if answer.trim().is_empty() {
                unanswered.push(i + 1);
            } else if question.word_limit > 0 && word_count(answer) < question.word_limit as usize
            {
                below_limit.push((i + 1, question.word_limit));
            }
        }

        if !unanswered.is_empty() {
            return Err(SubmissionError::Unanswered(unanswered));
        }
        if !below_limit.is_empty() {
            return Err(SubmissionError::BelowWordLimit(below_limit));
        }

        Ok(Self { assessment, answers })
    }

    /// Grades every answer concurrently and aggregates once all are in.
    pub async fn grade(&self, grader: &Grader) -> AttemptReport {
        let requests: Vec<GradingRequest> = self
            .assessment
            .questions
            .iter()
            .zip(&self.answers)
            .map(|(question, answer)| {
                GradingRequest::new(
                    question.text.as_str(),
                    question.model_answer.as_str(),
                    answer.as_str(),
                    question.marks as f64,
                )
            })
            .collect();

        let results = join_all(requests.iter().map(|request| grader.grade(request))).await;

        let outcomes: Vec<QuestionOutcome> = requests
            .iter()
            .zip(results)
            .enumerate()
            .map(|(i, (request, result))| QuestionOutcome::new(i + 1, request, result))
            .collect();

        AttemptReport::new(self.assessment, outcomes)
    }
}

/// Graded result for one question.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct QuestionOutcome {
    /// 1-based question number.
    #[tabled(rename = "#")]
    pub number:         usize,
    /// The question text.
    #[tabled(rename = "Question")]
    pub question:       String,
    /// The student's answer.
    #[tabled(skip)]
    pub student_answer: String,
    /// Marks available.
    #[tabled(skip)]
    pub max_marks:      f64,
    /// Awarded marks, formatted for display.
    #[tabled(rename = "Score")]
    #[serde(skip)]
    pub score_display:  String,
    /// Grading feedback.
    #[tabled(rename = "Feedback")]
    pub feedback:       String,
    /// Marks from the grader.
    #[tabled(skip)]
    pub graded_score:   f64,
    /// Plagiarism percentage, for display.
    #[tabled(rename = "Plagiarism %")]
    #[serde(skip)]
    pub plagiarism_pct: u32,
    /// Plagiarism estimate for the answer.
    #[tabled(skip)]
    pub plagiarism:     PlagiarismReport,
    /// Marks counted towards the total.
    #[tabled(skip)]
    pub final_score:    f64,
}

impl QuestionOutcome {
    /// Combines a grading result with a plagiarism check. Plagiarism is
    /// reported but carries no penalty.
    fn new(number: usize, request: &GradingRequest, result: GradingResult) -> Self {
        let plagiarism = plagiarism::check(request.student_answer());
        let final_score = result.score();

        Self {
            number,
            question: request.question().to_string(),
            student_answer: request.student_answer().to_string(),
            max_marks: result.max_marks(),
            score_display: format!("{:.1}/{}", final_score, result.max_marks()),
            feedback: result.feedback().to_string(),
            graded_score: result.score(),
            plagiarism_pct: plagiarism.percentage,
            plagiarism,
            final_score,
        }
    }
}

/// Overall verdict on an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Standing {
    /// 80% or more.
    Excellent,
    /// 60% or more.
    Good,
    /// Below 60%.
    NeedsImprovement,
}

impl Standing {
    /// Classifies a percentage.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 80.0 {
            Standing::Excellent
        } else if percentage >= 60.0 {
            Standing::Good
        } else {
            Standing::NeedsImprovement
        }
    }

    /// Message shown to the student.
    pub fn message(&self) -> &'static str {
        match self {
            Standing::Excellent => {
                "Excellent work! You have demonstrated strong understanding of the topics."
            }
            Standing::Good => "Good work! There's room for improvement in some areas.",
            Standing::NeedsImprovement => {
                "Needs improvement. Please review the topics and try again."
            }
        }
    }
}

/// Results of grading a whole attempt.
#[derive(Debug, Clone, Serialize)]
pub struct AttemptReport {
    /// Assessment title.
    pub title:       String,
    /// Per-question outcomes in question order.
    pub outcomes:    Vec<QuestionOutcome>,
    /// Sum of final scores.
    pub total_score: f64,
    /// Sum of question marks.
    pub total_marks: u32,
}

impl AttemptReport {
    /// Aggregates per-question outcomes.
    fn new(assessment: &Assessment, outcomes: Vec<QuestionOutcome>) -> Self {
        let total_score = outcomes.iter().map(|o| o.final_score).sum();
        Self {
            title: assessment.title.clone(),
            outcomes,
            total_score,
            total_marks: assessment.total_marks,
        }
    }

    /// Total score as a percentage of total marks; 0 when there are no marks.
    pub fn percentage(&self) -> f64 {
        if self.total_marks == 0 {
            0.0
        } else {
            self.total_score / self.total_marks as f64 * 100.0
        }
    }

    /// Overall verdict.
    pub fn standing(&self) -> Standing {
        Standing::from_percentage(self.percentage())
    }

    /// Renders the outcomes as a table with totals and the overall verdict.
    pub fn render(&self) -> String {
        Table::new(&self.outcomes)
            .with(Panel::header(format!("Assessment: {}", self.title)))
            .with(Panel::footer(format!(
                "Total: {:.1}/{} ({:.0}%) - {}",
                self.total_score,
                self.total_marks,
                self.percentage(),
                self.standing().message()
            )))
            .with(Modify::new(Rows::new(1..)).with(Width::wrap(40).keep_words(true)))
            .with(
                Modify::new(Rows::first())
                    .with(Alignment::center())
                    .with(Alignment::center_vertical()),
            )
            .with(
                Modify::new(Rows::last())
                    .with(Alignment::center())
                    .with(Alignment::center_vertical()),
            )
            .with(Style::modern())
            .to_string()
    }
}
