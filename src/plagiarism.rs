#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Keyword-pattern plagiarism heuristic. Informational only; it never
//! affects a score.

use serde::Serialize;

/// Phrases that suggest copied or cited material.
const SUSPICIOUS_PATTERNS: [&str; 8] = [
    "copy",
    "paste",
    "copied from",
    "source:",
    "wikipedia",
    "according to",
    "retrieved from",
    "cited from",
];

/// Percentage added per matched phrase.
const PER_PATTERN: u32 = 15;
/// Ceiling for pattern-based percentages.
const PATTERN_CAP: u32 = 50;
/// Answers shorter than this (in characters) get the floor percentage.
const SHORT_ANSWER_CHARS: usize = 30;
/// Floor percentage for very short answers.
const SHORT_ANSWER_FLOOR: u32 = 10;

/// Outcome of a plagiarism check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlagiarismReport {
    /// Estimated share of copied material, 0 to 50.
    pub percentage:        u32,
    /// Number of suspicious phrases found.
    pub patterns_detected: usize,
    /// Detection method used.
    pub method:            &'static str,
    /// Human-readable note.
    pub note:              &'static str,
}

/// Checks `text` for phrases that suggest copying.
pub fn check(text: &str) -> PlagiarismReport {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return PlagiarismReport {
            percentage:        0,
            patterns_detected: 0,
            method:            "basic_fallback",
            note:              "Empty text provided",
        };
    }

    let lower = text.to_lowercase();
    let patterns_detected = SUSPICIOUS_PATTERNS
        .iter()
        .filter(|pattern| lower.contains(*pattern))
        .count();

    let mut percentage = (patterns_detected as u32 * PER_PATTERN).min(PATTERN_CAP);
    if trimmed.chars().count() < SHORT_ANSWER_CHARS {
        percentage = percentage.max(SHORT_ANSWER_FLOOR);
    }

    PlagiarismReport {
        percentage,
        patterns_detected,
        method: "basic_fallback",
        note: "Basic heuristic-based detection used",
    }
}

/// Describes a report in one sentence.
pub fn explanation(report: &PlagiarismReport) -> String {
    let pct = report.percentage as f64;
    match report.percentage {
        0 => "No plagiarism detected.".to_string(),
        p if p < 15 => format!("Low similarity detected ({pct:.1}%). This is within acceptable limits."),
        p if p < 30 => {
            format!("Moderate similarity detected ({pct:.1}%). Some content may be borrowed.")
        }
        p if p < 50 => {
            format!("High similarity detected ({pct:.1}%). Significant portions may be copied.")
        }
        _ => format!("Very high similarity detected ({pct:.1}%). Major plagiarism concerns."),
    }
}
