#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{panic::AssertUnwindSafe, sync::Arc};

use anyhow::Result;
use futures::FutureExt;

use super::{
    heuristic, parser,
    results::{GradingRequest, GradingResult},
};
use crate::{
    config,
    provider::{Provider, ProviderError},
};

/// Grades answers by asking each provider in turn, falling back to the
/// heuristic grader when none of them answers.
#[derive(Clone)]
pub struct Grader {
    /// Providers in priority order.
    providers: Vec<Arc<dyn Provider>>,
}

impl Grader {
    /// Creates a grader over the given providers, tried in order.
    pub fn new(providers: Vec<Arc<dyn Provider>>) -> Self {
        Self { providers }
    }

    /// Creates a grader over the configured provider chain.
    pub fn from_config() -> Result<Self> {
        Ok(Self::new(config::ensure_initialized()?.provider_chain()))
    }

    /// Returns the provider chain.
    pub fn providers(&self) -> &[Arc<dyn Provider>] {
        &self.providers
    }

    /// Returns the name and text of the first provider that answers.
    async fn first_response(&self, request: &GradingRequest) -> Option<(String, String)> {
        let prompt = request.prompt();
        for provider in &self.providers {
            match provider.complete(&prompt).await {
                Ok(text) => return Some((provider.name().to_string(), text)),
                Err(ProviderError::MissingCredential(_)) => continue,
                Err(err) => tracing::info!("Grading with {} failed: {err}", provider.name()),
            }
        }
        None
    }

    /// Grades one answer. Never fails.
    pub async fn grade(&self, request: &GradingRequest) -> GradingResult {
        let attempt = AssertUnwindSafe(async {
            match self.first_response(request).await {
                Some((name, text)) => {
                    tracing::debug!("Parsing grading response from {name}");
                    parser::parse(&text, request.max_marks())
                }
                None => {
                    tracing::info!("No provider available; using basic grading");
                    heuristic::grade(request)
                }
            }
        })
        .catch_unwind()
        .await;

        match attempt {
            Ok(result) => result,
            Err(_) => {
                tracing::error!("Grading panicked; using basic grading");
                heuristic::grade(request)
            }
        }
    }

    /// Convenience wrapper taking the four grading inputs directly.
    pub async fn grade_answer(
        &self,
        question: &str,
        model_answer: &str,
        student_answer: &str,
        max_marks: f64,
    ) -> GradingResult {
        self.grade(&GradingRequest::new(question, model_answer, student_answer, max_marks))
            .await
    }
}
