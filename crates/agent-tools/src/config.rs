//! Static adapter configuration, loaded once at startup.

use std::env;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default bound on a single adapter request.
pub const DEFAULT_AGENT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default bound on the web-search summarization call.
pub const DEFAULT_SUMMARY_TIMEOUT: Duration = Duration::from_secs(15);

pub const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";
pub const ALPHAVANTAGE_API_URL: &str = "https://www.alphavantage.co";
pub const OPENWEATHER_API_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const GOOGLE_SEARCH_API_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Errors raised while loading configuration or building clients.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable is set to something unusable.
    #[error("invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// The HTTP client could not be constructed.
    #[error("failed to create HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Configuration for a single-key adapter (crypto, stock, weather).
#[derive(Debug, Clone)]
pub struct AdapterConfig {
    /// Base URL of the API, without trailing slash.
    pub base_url: String,
    /// API key, if the service needs one.
    pub api_key: Option<String>,
    /// Upper bound on one request.
    pub timeout: Duration,
}

impl AdapterConfig {
    /// Create a config for `base_url` with no key and the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
            timeout: DEFAULT_AGENT_TIMEOUT,
        }
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Configuration for the web-search adapter (two credentials).
#[derive(Debug, Clone)]
pub struct WebSearchConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub engine_id: Option<String>,
    pub timeout: Duration,
    /// Upper bound on the summarization call; on expiry raw results are shown.
    pub summary_timeout: Duration,
}

impl WebSearchConfig {
    /// Create a config for `base_url` with no credentials and default timeouts.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
            engine_id: None,
            timeout: DEFAULT_AGENT_TIMEOUT,
            summary_timeout: DEFAULT_SUMMARY_TIMEOUT,
        }
    }

    /// Set both Google credentials.
    pub fn with_credentials(mut self, api_key: impl Into<String>, engine_id: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self.engine_id = Some(engine_id.into());
        self
    }

    /// Set the search request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the summarization timeout.
    pub fn with_summary_timeout(mut self, timeout: Duration) -> Self {
        self.summary_timeout = timeout;
        self
    }
}

/// Configuration for all four adapters.
#[derive(Debug, Clone)]
pub struct AgentsConfig {
    pub crypto: AdapterConfig,
    pub stock: AdapterConfig,
    pub weather: AdapterConfig,
    pub web_search: WebSearchConfig,
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self {
            crypto: AdapterConfig::new(COINGECKO_API_URL),
            stock: AdapterConfig::new(ALPHAVANTAGE_API_URL),
            weather: AdapterConfig::new(OPENWEATHER_API_URL),
            web_search: WebSearchConfig::new(GOOGLE_SEARCH_API_URL),
        }
    }
}

impl AgentsConfig {
    /// Create configuration from environment variables.
    ///
    /// Credentials (all optional; a missing one disables only its adapter):
    /// - `ALPHAVANTAGE_API_KEY` - stock quotes
    /// - `OPENWEATHER_API_KEY` - weather
    /// - `GOOGLE_API_KEY`, `SEARCH_ENGINE_ID` - web search
    ///
    /// Tuning:
    /// - `AGENT_TIMEOUT_SECS` - per-request bound (default: 10)
    /// - `COINGECKO_API_URL`, `ALPHAVANTAGE_API_URL`, `OPENWEATHER_API_URL`,
    ///   `GOOGLE_SEARCH_API_URL` - base URL overrides
    ///
    /// Empty values count as unset. Malformed timeouts or URLs are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        let timeout = match non_empty_var("AGENT_TIMEOUT_SECS") {
            Some(raw) => parse_timeout("AGENT_TIMEOUT_SECS", &raw)?,
            None => DEFAULT_AGENT_TIMEOUT,
        };

        let base_url = |var: &str, default: &str| -> Result<String, ConfigError> {
            match non_empty_var(var) {
                Some(raw) => validate_url(var, &raw),
                None => Ok(default.to_string()),
            }
        };

        let crypto = AdapterConfig::new(base_url("COINGECKO_API_URL", COINGECKO_API_URL)?)
            .with_timeout(timeout);

        let mut stock = AdapterConfig::new(base_url("ALPHAVANTAGE_API_URL", ALPHAVANTAGE_API_URL)?)
            .with_timeout(timeout);
        stock.api_key = non_empty_var("ALPHAVANTAGE_API_KEY");

        let mut weather = AdapterConfig::new(base_url("OPENWEATHER_API_URL", OPENWEATHER_API_URL)?)
            .with_timeout(timeout);
        weather.api_key = non_empty_var("OPENWEATHER_API_KEY");

        let mut web_search =
            WebSearchConfig::new(base_url("GOOGLE_SEARCH_API_URL", GOOGLE_SEARCH_API_URL)?)
                .with_timeout(timeout);
        web_search.api_key = non_empty_var("GOOGLE_API_KEY");
        web_search.engine_id = non_empty_var("SEARCH_ENGINE_ID");

        Ok(Self {
            crypto,
            stock,
            weather,
            web_search,
        })
    }

    /// Names of credential variables that are not set, for a startup warning.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.stock.api_key.is_none() {
            missing.push("ALPHAVANTAGE_API_KEY");
        }
        if self.weather.api_key.is_none() {
            missing.push("OPENWEATHER_API_KEY");
        }
        if self.web_search.api_key.is_none() {
            missing.push("GOOGLE_API_KEY");
        }
        if self.web_search.engine_id.is_none() {
            missing.push("SEARCH_ENGINE_ID");
        }
        missing
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_timeout(var: &str, raw: &str) -> Result<Duration, ConfigError> {
    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidValue {
            var: var.to_string(),
            reason: format!("expected a positive number of seconds, got '{}'", raw),
        }),
    }
}

fn validate_url(var: &str, raw: &str) -> Result<String, ConfigError> {
    let parsed = Url::parse(raw).map_err(|e| ConfigError::InvalidValue {
        var: var.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidValue {
            var: var.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    Ok(raw.trim_end_matches('/').to_string())
}
