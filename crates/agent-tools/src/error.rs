//! Error types for agent lookups.

use std::fmt;

use thiserror::Error;

/// Kind of failure carried by a failed [`AgentResult`](crate::AgentResult).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The parameter failed validation; no request was made.
    InvalidInput,
    /// A required API key is not configured; no request was made.
    MissingCredential,
    /// The service answered, but the requested coin/ticker/place does not exist.
    NotFound,
    /// The service returned an error status or an unusable payload.
    UpstreamError,
    /// The service did not answer within the configured bound.
    Timeout,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidInput => "invalid_input",
            Self::MissingCredential => "missing_credential",
            Self::NotFound => "not_found",
            Self::UpstreamError => "upstream_error",
            Self::Timeout => "timeout",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while an agent looks something up.
///
/// The messages of `InvalidInput`, `MissingCredential` and `NotFound` are
/// written for the end user; `Upstream` and `Timeout` carry technical detail.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    MissingCredential(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{service} error: {detail}")]
    Upstream { service: String, detail: String },

    #[error("{service} did not respond in time: {detail}")]
    Timeout { service: String, detail: String },
}

impl AgentError {
    /// The error kind reported to the router.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::MissingCredential(_) => ErrorKind::MissingCredential,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Upstream { .. } => ErrorKind::UpstreamError,
            Self::Timeout { .. } => ErrorKind::Timeout,
        }
    }

    /// Upstream failure with context.
    pub fn upstream(service: &str, detail: impl Into<String>) -> Self {
        Self::Upstream {
            service: service.to_string(),
            detail: detail.into(),
        }
    }

    /// Classify a transport error from `service`.
    ///
    /// Timeouts (connect or read) become [`ErrorKind::Timeout`]; everything
    /// else, including body decode failures, is an upstream error.
    pub fn transport(service: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                service: service.to_string(),
                detail: err.to_string(),
            }
        } else {
            Self::upstream(service, err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(
            AgentError::InvalidInput("bad".into()).kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            AgentError::MissingCredential("no key".into()).kind(),
            ErrorKind::MissingCredential
        );
        assert_eq!(AgentError::NotFound("nope".into()).kind(), ErrorKind::NotFound);
        assert_eq!(
            AgentError::upstream("CoinGecko", "status 500").kind(),
            ErrorKind::UpstreamError
        );
    }

    #[test]
    fn test_user_messages_are_verbatim() {
        let err = AgentError::NotFound("Unknown cryptocurrency: dogecoin2".into());
        assert_eq!(err.to_string(), "Unknown cryptocurrency: dogecoin2");

        let err = AgentError::upstream("Alpha Vantage", "status 500");
        assert_eq!(err.to_string(), "Alpha Vantage error: status 500");
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ErrorKind::UpstreamError.to_string(), "upstream_error");
        assert_eq!(ErrorKind::Timeout.to_string(), "timeout");
    }
}
