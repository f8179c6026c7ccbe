//! Agent trait definition and result types.

use std::fmt;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{AgentError, ErrorKind};

/// The agents a query can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentKind {
    Crypto,
    Stock,
    Weather,
    WebSearch,
}

impl AgentKind {
    /// Every agent kind, in routing-prompt order.
    pub const ALL: [AgentKind; 4] = [
        AgentKind::Crypto,
        AgentKind::Stock,
        AgentKind::Weather,
        AgentKind::WebSearch,
    ];

    /// The tag the classifier prompt asks the model to emit.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Crypto => "crypto_asset",
            Self::Stock => "stock_asset",
            Self::Weather => "weather_asset",
            Self::WebSearch => "web_asset",
        }
    }

    /// Service name used in user-facing error messages.
    pub fn service_name(&self) -> &'static str {
        match self {
            Self::Crypto => "crypto price",
            Self::Stock => "stock quote",
            Self::Weather => "weather",
            Self::WebSearch => "web search",
        }
    }

    /// Parse a tag emitted by the model. Case-insensitive; accepts short aliases.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "crypto_asset" | "crypto" => Some(Self::Crypto),
            "stock_asset" | "stock" => Some(Self::Stock),
            "weather_asset" | "weather" => Some(Self::Weather),
            "web_asset" | "web" | "web_search" => Some(Self::WebSearch),
            _ => None,
        }
    }

    /// Parse only the full `*_asset` tag, case-insensitively.
    pub fn from_full_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(tag))
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one agent call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentResult {
    /// Text ready to show the user.
    Success(String),
    /// The call failed; `message` is human-readable.
    Failure { kind: ErrorKind, message: String },
}

impl AgentResult {
    /// Whether the call succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The failure kind, if the call failed.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Success(_) => None,
            Self::Failure { kind, .. } => Some(*kind),
        }
    }
}

impl From<Result<String, AgentError>> for AgentResult {
    fn from(result: Result<String, AgentError>) -> Self {
        match result {
            Ok(text) => Self::Success(text),
            Err(err) => Self::Failure {
                kind: err.kind(),
                message: err.to_string(),
            },
        }
    }
}

/// Uniform contract for API adapters.
///
/// Implementors provide [`lookup`](Agent::lookup), which validates the
/// parameter, makes at most one upstream request and formats the answer.
/// Callers use [`fetch`](Agent::fetch), which never fails: errors come back
/// as [`AgentResult::Failure`].
#[async_trait]
pub trait Agent: Send + Sync {
    /// The agent's unique name (used in logs).
    fn name(&self) -> &str;

    /// Human-readable description of what the agent answers.
    fn description(&self) -> &str;

    /// Look up `parameter` and format the answer.
    async fn lookup(&self, parameter: &str) -> Result<String, AgentError>;

    /// Look up `parameter`, folding any error into the result.
    async fn fetch(&self, parameter: &str) -> AgentResult {
        debug!(agent = self.name(), parameter, "Agent fetch");

        let result = self.lookup(parameter).await;
        if let Err(ref err) = result {
            warn!(agent = self.name(), kind = %err.kind(), error = %err, "Agent lookup failed");
        }
        result.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upper;

    #[async_trait]
    impl Agent for Upper {
        fn name(&self) -> &str {
            "upper"
        }

        fn description(&self) -> &str {
            "Uppercases its input"
        }

        async fn lookup(&self, parameter: &str) -> Result<String, AgentError> {
            if parameter.is_empty() {
                return Err(AgentError::InvalidInput("Nothing to uppercase.".into()));
            }
            Ok(parameter.to_uppercase())
        }
    }

    #[tokio::test]
    async fn test_fetch_folds_errors() {
        assert_eq!(Upper.fetch("abc").await, AgentResult::Success("ABC".into()));

        let failed = Upper.fetch("").await;
        assert_eq!(
            failed,
            AgentResult::Failure {
                kind: ErrorKind::InvalidInput,
                message: "Nothing to uppercase.".into()
            }
        );
        assert!(!failed.is_success());
        assert_eq!(failed.error_kind(), Some(ErrorKind::InvalidInput));
    }

    #[test]
    fn test_tags_round_trip() {
        for kind in AgentKind::ALL {
            assert_eq!(AgentKind::from_tag(kind.as_str()), Some(kind));
        }
        assert_eq!(AgentKind::from_tag("CRYPTO_ASSET"), Some(AgentKind::Crypto));
        assert_eq!(AgentKind::from_tag(" web "), Some(AgentKind::WebSearch));
        assert_eq!(AgentKind::from_tag("calculator"), None);

        assert_eq!(AgentKind::from_full_tag("Weather_Asset"), Some(AgentKind::Weather));
        assert_eq!(AgentKind::from_full_tag("weather"), None);
        assert_eq!(AgentKind::from_full_tag("web_search"), None);
    }
}
