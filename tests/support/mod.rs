#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use mark0::{ChatPrompt, Provider, ProviderError};

/// What a scripted provider does when asked.
#[derive(Clone)]
pub enum Behaviour {
    Reply(String),
    ReplyWhen(Vec<(&'static str, &'static str)>),
    Fail,
    Missing,
    Panic,
}

/// Provider double that follows a script and counts its calls.
pub struct Scripted {
    name:      &'static str,
    behaviour: Behaviour,
    calls:     AtomicUsize,
}

impl Scripted {
    pub fn new(name: &'static str, behaviour: Behaviour) -> Arc<Self> {
        Arc::new(Self {
            name,
            behaviour,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn replying(name: &'static str, text: &str) -> Arc<Self> {
        Self::new(name, Behaviour::Reply(text.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Provider for Scripted {
    fn name(&self) -> &str {
        self.name
    }

    async fn complete(&self, prompt: &ChatPrompt) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behaviour {
            Behaviour::Reply(text) => Ok(text.clone()),
            Behaviour::ReplyWhen(cases) => cases
                .iter()
                .find(|(needle, _)| prompt.user().contains(needle))
                .map(|(_, reply)| reply.to_string())
                .ok_or(ProviderError::MalformedBody),
            Behaviour::Fail => Err(ProviderError::Timeout),
            Behaviour::Missing => Err(ProviderError::MissingCredential(format!(
                "{}_API_KEY",
                self.name.to_uppercase()
            ))),
            Behaviour::Panic => panic!("{} blew up", self.name),
        }
    }
}

/// Upcasts scripted providers into a chain.
pub fn chain(providers: &[&Arc<Scripted>]) -> Vec<Arc<dyn Provider>> {
    providers
        .iter()
        .map(|p| Arc::clone(*p) as Arc<dyn Provider>)
        .collect()
}
