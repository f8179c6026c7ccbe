//! Configuration for LocalBrain.

use brain_core::BrainError;
use std::env;
use std::time::Duration;
use url::Url;

/// Default base URL of the local inference server (LM Studio's default port).
pub const DEFAULT_LOCAL_LLM_URL: &str = "http://localhost:1234";

/// Default model name. LM Studio answers with whatever model is loaded.
const DEFAULT_MODEL: &str = "local-model";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for LocalBrain.
#[derive(Debug, Clone)]
pub struct LocalBrainConfig {
    /// Base URL of the inference server, without the `/v1/...` path.
    pub api_url: String,

    /// Model name sent with each request.
    pub model: String,

    /// Optional system prompt.
    pub system_prompt: Option<String>,

    /// Maximum tokens for response.
    pub max_tokens: Option<u32>,

    /// Temperature for generation (0.0 - 2.0).
    pub temperature: Option<f32>,

    /// Upper bound on a single completion request.
    pub timeout: Duration,
}

impl Default for LocalBrainConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_LOCAL_LLM_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            system_prompt: None,
            max_tokens: Some(256),
            temperature: Some(0.2),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl LocalBrainConfig {
    /// Create configuration from environment variables.
    ///
    /// Optional environment variables (blank values count as unset):
    /// - `LOCAL_LLM_URL` - Base URL (default: http://localhost:1234)
    /// - `LOCAL_LLM_MODEL` - Model name (default: local-model)
    /// - `LOCAL_LLM_TIMEOUT_SECS` - Request timeout (default: 10)
    ///
    /// Prompt, temperature and token limits are set by the component that
    /// owns the brain, not by the environment.
    pub fn from_env() -> Result<Self, BrainError> {
        let api_url = non_empty_var("LOCAL_LLM_URL")
            .unwrap_or_else(|| DEFAULT_LOCAL_LLM_URL.to_string());
        let api_url = validate_base_url(&api_url)?;

        let model = non_empty_var("LOCAL_LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let timeout = match non_empty_var("LOCAL_LLM_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    BrainError::Configuration(format!(
                        "LOCAL_LLM_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                        raw
                    ))
                })?;
                if secs == 0 {
                    return Err(BrainError::Configuration(
                        "LOCAL_LLM_TIMEOUT_SECS must be greater than zero".to_string(),
                    ));
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            api_url,
            model,
            timeout,
            ..Self::default()
        })
    }

    /// Create a new config builder.
    pub fn builder() -> LocalBrainConfigBuilder {
        LocalBrainConfigBuilder::default()
    }

    /// Full URL of the chat-completions route.
    pub fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.api_url.trim_end_matches('/'))
    }
}

/// Accept only absolute http(s) URLs; strip a trailing slash.
fn validate_base_url(raw: &str) -> Result<String, BrainError> {
    let parsed = Url::parse(raw.trim())
        .map_err(|e| BrainError::Configuration(format!("invalid LOCAL_LLM_URL '{}': {}", raw, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(raw.trim().trim_end_matches('/').to_string()),
        other => Err(BrainError::Configuration(format!(
            "LOCAL_LLM_URL must use http or https, got '{}'",
            other
        ))),
    }
}

/// Builder for LocalBrainConfig.
#[derive(Debug, Default)]
pub struct LocalBrainConfigBuilder {
    config: LocalBrainConfig,
}

impl LocalBrainConfigBuilder {
    /// Set the base URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the system prompt.
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    /// Set the max tokens.
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.max_tokens = Some(tokens);
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> LocalBrainConfig {
        self.config
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
