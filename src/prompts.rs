#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use crate::provider::ChatPrompt;

/// Generated-token limit for grading calls.
const GRADING_MAX_TOKENS: u32 = 500;
/// Sampling temperature for grading calls.
const GRADING_TEMPERATURE: f32 = 0.3;
/// Generated-token limit for answer generation calls.
const GENERATION_MAX_TOKENS: u32 = 1000;
/// Sampling temperature for answer generation calls.
const GENERATION_TEMPERATURE: f32 = 0.7;

/// Text used in place of an absent model answer.
const NO_MODEL_ANSWER: &str = "No model answer provided";

/// Builds the prompt asking a provider to grade one answer.
pub fn grading_prompt(
    question: &str,
    model_answer: &str,
    student_answer: &str,
    max_marks: f64,
) -> ChatPrompt {
    let model_answer = if model_answer.trim().is_empty() {
        NO_MODEL_ANSWER
    } else {
        model_answer
    };

    ChatPrompt::builder()
        .system(include_str!("prompts/grading_system.md").trim())
        .user(format!(
            include_str!("prompts/grading_user.md"),
            question = question,
            model_answer = model_answer,
            student_answer = student_answer,
            max_marks = max_marks,
        ))
        .max_tokens(GRADING_MAX_TOKENS)
        .temperature(GRADING_TEMPERATURE)
        .build()
}

/// Builds the prompt asking a provider to write a model answer.
pub fn generation_prompt(question: &str) -> ChatPrompt {
    ChatPrompt::builder()
        .system(include_str!("prompts/generation_system.md").trim())
        .user(format!(include_str!("prompts/generation_user.md"), question = question))
        .max_tokens(GENERATION_MAX_TOKENS)
        .temperature(GENERATION_TEMPERATURE)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grading_prompt_asks_for_score_and_feedback_lines() {
        let prompt = grading_prompt("Define gravity", "", "A pull", 5.0);
        assert!(prompt.system().contains("expert teacher grading"));
        assert!(prompt.user().contains("Model Answer: No model answer provided"));
        assert!(prompt.user().contains("Score: [number out of 5]"));
        assert!(prompt.user().contains("Feedback:"));
        assert_eq!(prompt.max_tokens(), 500);
    }

    #[test]
    fn generation_prompt_uses_educational_preamble() {
        let prompt = generation_prompt("What is DNA?");
        assert!(prompt.system().contains("expert educational assistant"));
        assert!(prompt.user().starts_with("Question: What is DNA?"));
        assert_eq!(prompt.max_tokens(), 1000);
    }
}
