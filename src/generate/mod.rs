#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Model-answer generation.
//!
//! Providers are asked in order for an explanatory answer. When none of them
//! produces a usable one, the question is matched against a table of canned
//! topic explanations, and failing that a structured outline is returned.

/// Canned explanations keyed by topic keywords.
pub mod knowledge;
/// Fill-in outlines chosen by question form.
pub mod templates;

use std::{panic::AssertUnwindSafe, sync::Arc};

use anyhow::Result;
use futures::FutureExt;

use crate::{config, prompts, provider::Provider};

/// Provider answers this short or shorter (in characters) are discarded.
pub const MIN_ANSWER_CHARS: usize = 20;

/// Where a generated answer came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerSource {
    /// A provider, by name.
    Provider(String),
    /// The canned topic table, by topic.
    Knowledge(String),
    /// A structured outline.
    Template,
}

/// A model answer and its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedAnswer {
    /// The answer text.
    pub text:   String,
    /// Where the text came from.
    pub source: AnswerSource,
}

/// Writes model answers for questions.
#[derive(Clone)]
pub struct AnswerGenerator {
    /// Providers in priority order.
    providers: Vec<Arc<dyn Provider>>,
}

impl AnswerGenerator {
    /// Creates a generator over the given providers, tried in order.
    pub fn new(providers: Vec<Arc<dyn Provider>>) -> Self {
        Self { providers }
    }

    /// Creates a generator over the configured provider chain.
    pub fn from_config() -> Result<Self> {
        Ok(Self::new(config::ensure_initialized()?.provider_chain()))
    }

    /// Returns the first provider answer long enough to be useful.
    async fn from_providers(&self, question: &str) -> Option<GeneratedAnswer> {
        let prompt = prompts::generation_prompt(question);
        for provider in &self.providers {
            match provider.complete(&prompt).await {
                Ok(text) if text.trim().chars().count() > MIN_ANSWER_CHARS => {
                    return Some(GeneratedAnswer {
                        text:   text.trim().to_string(),
                        source: AnswerSource::Provider(provider.name().to_string()),
                    });
                }
                Ok(_) => tracing::info!("{} returned too short an answer", provider.name()),
                Err(err) => tracing::debug!("{} could not generate: {err}", provider.name()),
            }
        }
        None
    }

    /// Answers from the canned topic table or an outline.
    pub fn offline(question: &str) -> GeneratedAnswer {
        match knowledge::lookup(question) {
            Some(topic) => GeneratedAnswer {
                text:   topic.answer.clone(),
                source: AnswerSource::Knowledge(topic.topic.clone()),
            },
            None => GeneratedAnswer {
                text:   templates::render(question),
                source: AnswerSource::Template,
            },
        }
    }

    /// Generates a model answer. Never fails.
    pub async fn generate(&self, question: &str) -> GeneratedAnswer {
        let attempt = AssertUnwindSafe(self.from_providers(question))
            .catch_unwind()
            .await;

        match attempt {
            Ok(Some(answer)) => answer,
            Ok(None) => {
                tracing::info!("Providers unavailable; using offline answer");
                Self::offline(question)
            }
            Err(_) => {
                tracing::error!("Answer generation panicked; using offline answer");
                Self::offline(question)
            }
        }
    }
}
