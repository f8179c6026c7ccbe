//! Structured routing decision produced by the classifier.

use std::fmt;

use agent_tools::AgentKind;

/// Where a query should go, and with what parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentDecision {
    Crypto(String),
    Stock(String),
    Weather(String),
    WebSearch(String),
    /// The model's reply matched no agent.
    Unknown,
}

impl IntentDecision {
    /// Build a decision for `kind`. A blank parameter collapses to `Unknown`.
    pub fn new(kind: AgentKind, parameter: impl Into<String>) -> Self {
        let parameter = parameter.into().trim().to_string();
        if parameter.is_empty() {
            return Self::Unknown;
        }
        match kind {
            AgentKind::Crypto => Self::Crypto(parameter),
            AgentKind::Stock => Self::Stock(parameter),
            AgentKind::Weather => Self::Weather(parameter),
            AgentKind::WebSearch => Self::WebSearch(parameter),
        }
    }

    /// The target agent and parameter, or `None` for `Unknown`.
    pub fn target(&self) -> Option<(AgentKind, &str)> {
        match self {
            Self::Crypto(p) => Some((AgentKind::Crypto, p)),
            Self::Stock(p) => Some((AgentKind::Stock, p)),
            Self::Weather(p) => Some((AgentKind::Weather, p)),
            Self::WebSearch(p) => Some((AgentKind::WebSearch, p)),
            Self::Unknown => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl fmt::Display for IntentDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target() {
            Some((kind, parameter)) => write!(f, "[{}] {}", kind, parameter),
            None => f.write_str("unknown"),
        }
    }
}
