#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    path::PathBuf,
    sync::{Arc, Mutex, OnceLock},
    time::Duration,
};

use anyhow::{Context, Result, anyhow};
use reqwest::Client;

use crate::provider::{ChatProvider, Provider};

/// Default timeout applied to every provider request.
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 30;

/// Default location of the assessment document.
pub const DEFAULT_STORE_PATH: &str = "assessments.json";

/// Connection details for one OpenAI-compatible chat-completion provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    /// Short provider name used in logs.
    name:        String,
    /// Chat-completion endpoint URL.
    endpoint:    String,
    /// Model identifier sent with each request.
    model:       String,
    /// Environment variable holding the bearer credential.
    api_key_env: String,
}

impl ProviderSettings {
    /// Builds settings for a provider, honouring `<NAME>_ENDPOINT` and
    /// `<NAME>_MODEL` overrides from the environment.
    fn preset(name: &str, endpoint: &str, model: &str) -> Self {
        let prefix = name.to_ascii_uppercase();
        let endpoint = env_override(&format!("{prefix}_ENDPOINT")).unwrap_or(endpoint.to_string());
        let model = env_override(&format!("{prefix}_MODEL")).unwrap_or(model.to_string());

        Self {
            name: name.to_string(),
            endpoint,
            model,
            api_key_env: format!("{prefix}_API_KEY"),
        }
    }

    /// The default provider chain, in priority order.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::preset(
                "groq",
                "https://api.groq.com/openai/v1/chat/completions",
                "llama-3.3-70b-versatile",
            ),
            Self::preset("deepseek", "https://api.deepseek.com/chat/completions", "deepseek-chat"),
            Self::preset(
                "mistral",
                "https://api.mistral.ai/v1/chat/completions",
                "mistral-small-latest",
            ),
        ]
    }

    /// Returns the provider name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the name of the credential environment variable.
    pub fn api_key_env(&self) -> &str {
        &self.api_key_env
    }
}

/// Runtime configuration shared across the crate.
pub struct ConfigState {
    /// Shared reqwest HTTP client reused by every provider.
    http_client:      Client,
    /// Timeout applied to each provider request.
    provider_timeout: Duration,
    /// Path of the JSON assessment document.
    store_path:       PathBuf,
    /// Provider chain in priority order.
    providers:        Vec<ProviderSettings>,
}

impl ConfigState {
    /// Construct a new configuration instance from the environment.
    fn new() -> Result<Self> {
        let http_client = Client::builder()
            // Avoid macOS dynamic store lookups that fail in sandboxed environments.
            .no_proxy()
            .build()
            .context("Failed to construct shared HTTP client")?;

        let store_path = env_override("MARK0_STORE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH));

        Ok(Self {
            http_client,
            provider_timeout: read_timeout_secs(
                "MARK0_PROVIDER_TIMEOUT_SECS",
                DEFAULT_PROVIDER_TIMEOUT_SECS,
            ),
            store_path,
            providers: ProviderSettings::defaults(),
        })
    }

    /// Returns a clone of the shared reqwest HTTP client.
    pub fn http_client(&self) -> Client {
        self.http_client.clone()
    }

    /// Returns the assessment document path.
    pub fn store_path(&self) -> &PathBuf {
        &self.store_path
    }

    /// Returns the provider settings in priority order.
    pub fn providers(&self) -> &[ProviderSettings] {
        &self.providers
    }

    /// Instantiates the provider chain. Credentials are resolved by each
    /// provider at call time, so unconfigured providers are still listed.
    pub fn provider_chain(&self) -> Vec<Arc<dyn Provider>> {
        self.providers
            .iter()
            .map(|settings| {
                Arc::new(
                    ChatProvider::builder()
                        .name(settings.name())
                        .endpoint(settings.endpoint())
                        .model(settings.model())
                        .api_key_env(settings.api_key_env())
                        .timeout(self.provider_timeout)
                        .client(self.http_client())
                        .build(),
                ) as Arc<dyn Provider>
            })
            .collect()
    }
}

/// Shared configuration handle used throughout the crate.
#[derive(Clone)]
pub struct ConfigHandle(Arc<ConfigState>);

impl std::ops::Deref for ConfigHandle {
    type Target = ConfigState;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Global storage for the lazily constructed configuration state.
static CONFIG_SLOT: OnceLock<Mutex<Option<Arc<ConfigState>>>> = OnceLock::new();

/// Returns the mutex guarding the global configuration slot.
fn slot() -> &'static Mutex<Option<Arc<ConfigState>>> {
    CONFIG_SLOT.get_or_init(|| Mutex::new(None))
}

/// Ensure the global configuration has been initialized and return a handle.
pub fn ensure_initialized() -> Result<ConfigHandle> {
    let mut guard = slot()
        .lock()
        .map_err(|_| anyhow!("configuration slot poisoned"))?;
    if let Some(cfg) = guard.as_ref() {
        return Ok(ConfigHandle(Arc::clone(cfg)));
    }

    let cfg = Arc::new(ConfigState::new()?);
    *guard = Some(Arc::clone(&cfg));
    Ok(ConfigHandle(cfg))
}

/// Reads a non-blank, trimmed environment variable.
pub(crate) fn env_override(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Parses an environment variable into a `Duration`, falling back to
/// `default_secs` when parsing fails or the variable is missing.
fn read_timeout_secs(env: &str, default_secs: u64) -> Duration {
    std::env::var(env)
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(default_secs))
}
