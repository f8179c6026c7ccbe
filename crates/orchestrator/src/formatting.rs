//! User-facing text for routing outcomes.

use agent_tools::{AgentKind, AgentResult, ErrorKind};

/// Shown when the local model cannot be reached.
pub const CLASSIFIER_UNAVAILABLE_MESSAGE: &str =
    "Sorry, I can't reach the language model right now. Please check that it is running and try again.";

/// Shown when the query matches no agent.
pub const UNKNOWN_REQUEST_MESSAGE: &str =
    "I couldn't understand that request. Try asking about a cryptocurrency, a stock, the weather, or something to search the web for.";

/// Shown for a blank query.
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a question.";

/// Turn an agent result into the line shown to the user.
///
/// Successes pass through unchanged. Failures get an `Error:` prefix;
/// transport-level failures are phrased by service, the rest use the
/// adapter's own message.
pub fn format_result(agent: AgentKind, result: AgentResult) -> String {
    match result {
        AgentResult::Success(text) => text,
        AgentResult::Failure {
            kind: ErrorKind::Timeout,
            ..
        } => format!(
            "Error: The {} service is taking too long to respond. Please try again later.",
            agent.service_name()
        ),
        AgentResult::Failure {
            kind: ErrorKind::UpstreamError,
            ..
        } => format!(
            "Error: The {} service is unavailable right now. Please try again later.",
            agent.service_name()
        ),
        AgentResult::Failure { message, .. } => format!("Error: {}", message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(kind: ErrorKind, message: &str) -> AgentResult {
        AgentResult::Failure {
            kind,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_success_passes_through() {
        let text = "Bitcoin: $65000.12 USD";
        assert_eq!(
            format_result(AgentKind::Crypto, AgentResult::Success(text.into())),
            text
        );
    }

    #[test]
    fn test_transport_failures_hide_detail() {
        let timeout = format_result(
            AgentKind::Weather,
            failure(ErrorKind::Timeout, "OpenWeather request timed out: operation timed out"),
        );
        assert_eq!(
            timeout,
            "Error: The weather service is taking too long to respond. Please try again later."
        );

        let upstream = format_result(
            AgentKind::Stock,
            failure(ErrorKind::UpstreamError, "Alpha Vantage error: status 500"),
        );
        assert!(upstream.starts_with("Error: The stock quote service is unavailable"));
        assert!(!upstream.contains("500"));
    }

    #[test]
    fn test_adapter_messages_are_kept() {
        for kind in [
            ErrorKind::InvalidInput,
            ErrorKind::MissingCredential,
            ErrorKind::NotFound,
        ] {
            assert_eq!(
                format_result(AgentKind::Crypto, failure(kind, "Unknown cryptocurrency: dogecoinz")),
                "Error: Unknown cryptocurrency: dogecoinz"
            );
        }
    }
}
