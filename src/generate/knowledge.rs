#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::sync::LazyLock;

use serde::Deserialize;

/// One canned explanation and the keywords that select it.
#[derive(Debug, Clone, Deserialize)]
pub struct Topic {
    /// Display name of the topic.
    pub topic:    String,
    /// Words or phrases that select this topic.
    pub keywords: Vec<String>,
    /// The canned explanation.
    pub answer:   String,
}

/// Topics in lookup order, parsed once from the embedded table.
static TOPICS: LazyLock<Vec<Topic>> = LazyLock::new(|| {
    serde_json::from_str(include_str!("knowledge.json")).unwrap_or_else(|err| {
        tracing::error!("Knowledge table is invalid: {err}");
        Vec::new()
    })
});

/// Lowercased alphanumeric tokens of `text`.
pub(crate) fn tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Whether `phrase` occurs in `words` as a contiguous run of whole words.
fn contains_phrase(words: &[String], phrase: &str) -> bool {
    let needle = tokens(phrase);
    !needle.is_empty() && words.windows(needle.len()).any(|window| window == needle.as_slice())
}

/// Returns every topic in lookup order.
pub fn topics() -> &'static [Topic] {
    &TOPICS
}

/// Returns the first topic with a keyword present in `question`.
pub fn lookup(question: &str) -> Option<&'static Topic> {
    let words = tokens(question);
    TOPICS.iter().find(|topic| {
        topic
            .keywords
            .iter()
            .any(|keyword| contains_phrase(&words, keyword))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_table_parses() {
        assert!(topics().len() >= 10);
        assert!(topics().iter().all(|t| !t.answer.trim().is_empty()));
    }

    #[test]
    fn keywords_match_whole_words_only() {
        // "explain" contains "ai" but must not select the AI topic
        assert!(lookup("Explain the causes of inflation").is_none());
        assert_eq!(lookup("Is AI dangerous?").map(|t| t.topic.as_str()), Some("artificial intelligence"));
    }

    #[test]
    fn phrases_match_contiguously() {
        assert_eq!(lookup("Describe the water cycle").map(|t| t.topic.as_str()), Some("water cycle"));
        assert_eq!(
            lookup("What happened in World War II?").map(|t| t.topic.as_str()),
            Some("world war ii")
        );
        assert!(lookup("water in the cycle").is_none());
    }

    #[test]
    fn bare_world_war_means_the_second() {
        let topic = |q: &str| lookup(q).map(|t| t.topic.as_str());
        assert_eq!(topic("What caused the world war?"), Some("world war ii"));
        assert_eq!(topic("What caused the First World War?"), Some("world war i"));
        assert_eq!(topic("Summarise WW1"), Some("world war i"));
    }

    #[test]
    fn elements_select_the_periodic_table() {
        assert_eq!(
            lookup("Name the elements discovered in 1800").map(|t| t.topic.as_str()),
            Some("periodic table")
        );
    }

    #[test]
    fn first_matching_topic_wins() {
        // both gravity and democracy keywords appear; gravity is listed first
        assert_eq!(
            lookup("Does gravity affect democracy?").map(|t| t.topic.as_str()),
            Some("gravity")
        );
    }
}
