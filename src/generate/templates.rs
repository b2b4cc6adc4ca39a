#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Structured outlines used when no provider or canned topic can answer.

use itertools::Itertools;

use super::knowledge::tokens;

/// Broad shape of a question, chosen from its cue words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionForm {
    /// "What is...", "Define..."
    Definition,
    /// "How does...", "Describe the steps..."
    Process,
    /// "Why...", "What causes..."
    Reason,
    /// Anything else.
    General,
}

impl QuestionForm {
    /// Classifies a question by the first matching cue-word group.
    pub fn classify(question: &str) -> Self {
        let words = tokens(question);
        let has_any = |cues: &[&str]| words.iter().any(|w| cues.contains(&w.as_str()));

        if has_any(&["what", "define", "definition", "meaning"]) {
            QuestionForm::Definition
        } else if has_any(&["how", "process", "steps", "method"]) {
            QuestionForm::Process
        } else if has_any(&["why", "reason", "cause", "because"]) {
            QuestionForm::Reason
        } else {
            QuestionForm::General
        }
    }
}

/// Question and connective words that never name the topic.
const FILLER_WORDS: &[&str] = &[
    "what", "is", "are", "how", "why", "when", "where", "who", "which", "does", "do", "can",
    "will", "would", "should", "could", "the", "a", "an", "and", "or", "but", "in", "on", "at",
    "to", "for", "of", "with", "by",
];

/// Joins up to `limit` question words that are not in `skip`.
fn subject(question: &str, skip: &[&str], min_len: usize, limit: usize) -> Option<String> {
    let picked = tokens(question)
        .into_iter()
        .filter(|w| w.chars().count() > min_len && !skip.contains(&w.as_str()))
        .take(limit)
        .join(" ");
    (!picked.is_empty()).then_some(picked)
}

/// Capitalises the first letter of every word.
fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .join(" ")
}

/// Renders a fill-in outline for the question.
pub fn render(question: &str) -> String {
    match QuestionForm::classify(question) {
        QuestionForm::Definition => {
            let topic = subject(
                question,
                &["what", "define", "definition", "meaning", "explain", "describe"],
                3,
                1,
            )
            .unwrap_or_else(|| "the concept".to_string());
            let title = title_case(&topic);
            format!(
                "To answer \"what is {topic}\":\n\n\
                 {title} refers to [clear definition].\n\n\
                 Key characteristics:\n\
                 - [First important feature]\n\
                 - [Second important feature]\n\
                 - [Third important feature]\n\n\
                 Why it matters: [importance and applications].\n\n\
                 Examples of {topic}: [specific, relevant examples].\n\n\
                 {title} relates to [broader context or connected concepts]."
            )
        }
        QuestionForm::Process => {
            let process = subject(
                question,
                &["how", "does", "do", "work", "process", "steps", "method"],
                0,
                3,
            )
            .unwrap_or_else(|| "this process".to_string());
            format!(
                "The process of {process} involves several key steps:\n\n\
                 Step 1: [What happens first]\n\
                 Step 2: [The next phase]\n\
                 Step 3: [The following stage]\n\
                 Step 4: [How it concludes]\n\n\
                 Factors that affect {process}:\n\
                 - [First factor]\n\
                 - [Second factor]\n\
                 - [Third factor]\n\n\
                 Understanding {process} matters because [why this knowledge is useful]."
            )
        }
        QuestionForm::Reason => {
            let topic = subject(
                question,
                &["why", "does", "do", "is", "are", "reason", "cause", "because"],
                0,
                3,
            )
            .unwrap_or_else(|| "this phenomenon".to_string());
            format!(
                "The reasons for {topic} are:\n\n\
                 Primary reasons:\n\
                 1. [First major cause, explained]\n\
                 2. [Second major cause, explained]\n\
                 3. [Third major cause, with context]\n\n\
                 Contributing factors:\n\
                 - [Additional factor]\n\
                 - [Additional factor]\n\n\
                 The consequences of {topic} include [effects and implications]."
            )
        }
        QuestionForm::General => match subject(question, FILLER_WORDS, 0, 2) {
            Some(topic) => {
                let title = title_case(&topic);
                format!(
                    "Answer for: {question}\n\n\
                     To answer this question about {topic}, cover the following points.\n\n\
                     Definition/Overview:\n\
                     {title} refers to [the concept or process being asked about]. It matters in \
                     [relevant field] because [significance].\n\n\
                     Key Characteristics:\n\
                     - [Primary feature]\n\
                     - [Secondary feature]\n\
                     - [Another important point]\n\n\
                     Examples/Applications:\n\
                     - [Concrete example]\n\
                     - [Real-world application]\n\n\
                     Related Concepts:\n\
                     {title} connects to [related topics] and shapes [broader implications].\n\n\
                     Significance:\n\
                     Understanding {topic} matters because [practical relevance].\n\n\
                     Note: this is an outline. Research the specifics of {topic} to complete it."
                )
            }
            None => format!(
                "Model answer for: \"{question}\"\n\n\
                 Introduction:\n\
                 [Context for the question and definitions of its key terms]\n\n\
                 Main content:\n\
                 - [Address each part of the question in turn]\n\
                 - [Specific facts, examples and evidence]\n\
                 - [How the concepts relate to each other]\n\n\
                 Conclusion:\n\
                 [Summary of the key points and their overall significance]"
            ),
        },
    }
}
