//! Web search adapter using the Google Custom Search JSON API.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use brain_core::{Brain, InboundMessage};
use serde::Deserialize;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::{http_client, parse_json, send};
use crate::agent::Agent;
use crate::config::{ConfigError, WebSearchConfig};
use crate::error::AgentError;

const SERVICE: &str = "Google Search";

/// Results shown and summarized per query.
const MAX_RESULTS: usize = 3;

/// Answer when the search succeeds but finds nothing.
pub const NO_RESULTS_MESSAGE: &str = "No relevant results found.";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    error: GoogleErrorDetails,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorDetails {
    message: String,
}

/// One search result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub snippet: String,
}

impl SearchHit {
    fn title(&self) -> &str {
        if self.title.trim().is_empty() {
            "No Title"
        } else {
            self.title.trim()
        }
    }

    fn link(&self) -> &str {
        if self.link.trim().is_empty() {
            "No Link"
        } else {
            self.link.trim()
        }
    }

    fn snippet(&self) -> String {
        self.snippet.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// Web search adapter.
///
/// Requires `GOOGLE_API_KEY` and `SEARCH_ENGINE_ID`. Takes the top three
/// results and, when a summarizer brain is attached, asks it for a short
/// summary. A failed, empty or slow summary falls back to listing the raw
/// results; it never fails the lookup.
pub struct WebSearch {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    engine_id: Option<String>,
    summarizer: Option<Arc<dyn Brain>>,
    summary_timeout: Duration,
}

impl WebSearch {
    /// Create a web search adapter without summarization.
    pub fn new(config: &WebSearchConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            client: http_client(config.timeout)?,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            engine_id: config.engine_id.clone(),
            summarizer: None,
            summary_timeout: config.summary_timeout,
        })
    }

    /// Create a web search adapter that summarizes results with `brain`.
    pub fn with_summarizer(config: &WebSearchConfig, brain: Arc<dyn Brain>) -> Result<Self, ConfigError> {
        let mut search = Self::new(config)?;
        search.summarizer = Some(brain);
        Ok(search)
    }

    async fn search(&self, api_key: &str, engine_id: &str, query: &str) -> Result<Vec<SearchHit>, AgentError> {
        debug!("Searching for '{}' via {}", query, self.base_url);

        let num = MAX_RESULTS.to_string();
        let request = self.client.get(&self.base_url).query(&[
            ("key", api_key),
            ("cx", engine_id),
            ("q", query),
            ("num", num.as_str()),
        ]);
        let (status, body) = send(SERVICE, request).await?;

        if !status.is_success() {
            let detail = serde_json::from_str::<GoogleError>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Google Search returned {}: {}", status, detail);
            return Err(AgentError::upstream(
                SERVICE,
                format!("status {}: {}", status.as_u16(), detail),
            ));
        }

        let response: SearchResponse = parse_json(SERVICE, &body)?;
        Ok(response.items.into_iter().take(MAX_RESULTS).collect())
    }

    /// Ask the summarizer for a digest. `None` on any failure.
    async fn summarize(&self, query: &str, hits: &[SearchHit]) -> Option<String> {
        let brain = self.summarizer.as_ref()?;

        let context = hits
            .iter()
            .map(|hit| format!("{}: {}", hit.title(), hit.snippet()))
            .collect::<Vec<_>>()
            .join("\n");
        let message = InboundMessage::direct("summarizer", context).with_instructions(format!(
            "Summarize web results about {} in 3 concise points",
            query
        ));

        match timeout(self.summary_timeout, brain.process(message)).await {
            Ok(Ok(reply)) if !reply.text.trim().is_empty() => Some(reply.text.trim().to_string()),
            Ok(Ok(_)) => {
                warn!("Summarizer returned an empty summary; showing raw results");
                None
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Summarization failed; showing raw results");
                None
            }
            Err(_) => {
                warn!(
                    "Summarization exceeded {:?}; showing raw results",
                    self.summary_timeout
                );
                None
            }
        }
    }

    fn format_sources(hits: &[SearchHit]) -> String {
        hits.iter()
            .enumerate()
            .map(|(idx, hit)| format!("{}. {}\n   {}", idx + 1, hit.title(), hit.link()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_summary(query: &str, summary: &str, hits: &[SearchHit]) -> String {
        format!(
            "Here's what I found about {}:\n{}\n\nSources:\n{}",
            query,
            summary,
            Self::format_sources(hits)
        )
    }

    fn format_raw(query: &str, hits: &[SearchHit]) -> String {
        let results = hits
            .iter()
            .enumerate()
            .map(|(idx, hit)| {
                let snippet = hit.snippet();
                if snippet.is_empty() {
                    format!("{}. {}\n   {}", idx + 1, hit.title(), hit.link())
                } else {
                    format!("{}. {}\n   {}\n   {}", idx + 1, hit.title(), snippet, hit.link())
                }
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!("Top results for {}:\n{}", query, results)
    }
}

#[async_trait]
impl Agent for WebSearch {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "General web search via Google, optionally summarized by the local model."
    }

    async fn lookup(&self, parameter: &str) -> Result<String, AgentError> {
        let (api_key, engine_id) = match (self.api_key.as_deref(), self.engine_id.as_deref()) {
            (Some(key), Some(cx)) => (key, cx),
            _ => {
                return Err(AgentError::MissingCredential(
                    "Web search is not configured: set GOOGLE_API_KEY and SEARCH_ENGINE_ID."
                        .to_string(),
                ))
            }
        };

        let query = parameter.trim();
        if query.is_empty() {
            return Err(AgentError::InvalidInput(
                "Please say what to search for.".to_string(),
            ));
        }

        let hits = self.search(api_key, engine_id, query).await?;
        if hits.is_empty() {
            return Ok(NO_RESULTS_MESSAGE.to_string());
        }

        info!("Web search for '{}' returned {} results", query, hits.len());

        Ok(match self.summarize(query, &hits).await {
            Some(summary) => Self::format_summary(query, &summary, &hits),
            None => Self::format_raw(query, &hits),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentResult;
    use crate::error::ErrorKind;
    use mock_brain::{DelayedBrain, FailingBrain, ScriptedBrain};
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(server: &MockServer) -> WebSearchConfig {
        WebSearchConfig::new(server.uri())
            .with_credentials("g-key", "cx-1")
            .with_timeout(Duration::from_millis(300))
            .with_summary_timeout(Duration::from_millis(200))
    }

    async fn mount_results(server: &MockServer) {
        Mock::given(method("GET"))
            .and(query_param("q", "pixel 9 reviews"))
            .and(query_param("key", "g-key"))
            .and(query_param("cx", "cx-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [
                    {"title": "Pixel 9 review", "link": "https://a.example/p9", "snippet": "Great camera,\nsolid battery."},
                    {"title": "Pixel 9 vs iPhone", "link": "https://b.example/vs", "snippet": "A close race."},
                    {"title": "Pixel 9 long term", "link": "https://c.example/lt", "snippet": ""},
                    {"title": "Fourth result", "link": "https://d.example/4", "snippet": "Ignored."}
                ]
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_summarized_results() {
        let server = MockServer::start().await;
        mount_results(&server).await;

        let brain = Arc::new(ScriptedBrain::replying("1. Great camera\n2. Good battery\n3. Pricey"));
        let search = WebSearch::with_summarizer(&config(&server), brain.clone()).unwrap();

        let text = match search.fetch("pixel 9 reviews").await {
            AgentResult::Success(text) => text,
            other => panic!("expected success, got {:?}", other),
        };

        assert!(text.starts_with("Here's what I found about pixel 9 reviews:\n1. Great camera"));
        assert!(text.contains("Sources:\n1. Pixel 9 review\n   https://a.example/p9"));
        assert!(text.contains("3. Pixel 9 long term"));
        assert!(!text.contains("Fourth result"));

        let sent = brain.received();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].instructions.as_deref(),
            Some("Summarize web results about pixel 9 reviews in 3 concise points")
        );
        assert!(sent[0].text.contains("Pixel 9 review: Great camera, solid battery."));
    }

    #[tokio::test]
    async fn test_failed_summary_falls_back_to_raw() {
        let server = MockServer::start().await;
        mount_results(&server).await;

        let brain = Arc::new(FailingBrain::unreachable());
        let search = WebSearch::with_summarizer(&config(&server), brain.clone()).unwrap();

        let result = search.fetch("pixel 9 reviews").await;
        let AgentResult::Success(text) = result else {
            panic!("summary failure must not fail the lookup");
        };
        assert!(text.starts_with("Top results for pixel 9 reviews:"));
        assert!(text.contains("1. Pixel 9 review\n   Great camera, solid battery.\n   https://a.example/p9"));
        assert!(text.contains("3. Pixel 9 long term\n   https://c.example/lt"));
        assert_eq!(brain.call_count(), 1);
    }

    #[tokio::test]
    async fn test_slow_summary_falls_back_to_raw() {
        let server = MockServer::start().await;
        mount_results(&server).await;

        let brain = Arc::new(DelayedBrain::with_millis(ScriptedBrain::replying("too late"), 2_000));
        let search = WebSearch::with_summarizer(&config(&server), brain).unwrap();

        let result = search.fetch("pixel 9 reviews").await;
        let AgentResult::Success(text) = result else {
            panic!("slow summary must not fail the lookup");
        };
        assert!(text.starts_with("Top results for"));
        assert!(!text.contains("too late"));
    }

    #[tokio::test]
    async fn test_without_summarizer_lists_results() {
        let server = MockServer::start().await;
        mount_results(&server).await;

        let search = WebSearch::new(&config(&server)).unwrap();
        let result = search.fetch("pixel 9 reviews").await;
        assert!(matches!(result, AgentResult::Success(ref t) if t.starts_with("Top results for")));
    }

    #[tokio::test]
    async fn test_no_items() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "searchInformation": {"totalResults": "0"}
            })))
            .mount(&server)
            .await;

        let brain = Arc::new(ScriptedBrain::replying("unused"));
        let search = WebSearch::with_summarizer(&config(&server), brain.clone()).unwrap();

        assert_eq!(
            search.fetch("zxqv nothing").await,
            AgentResult::Success(NO_RESULTS_MESSAGE.into())
        );
        assert_eq!(brain.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_engine_id_makes_no_request() {
        let server = MockServer::start().await;

        let mut cfg = config(&server);
        cfg.engine_id = None;
        let search = WebSearch::new(&cfg).unwrap();

        let result = search.fetch("rust").await;
        assert_eq!(result.error_kind(), Some(ErrorKind::MissingCredential));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_quota_error_is_upstream() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": {"code": 429, "message": "Quota exceeded"}
            })))
            .mount(&server)
            .await;

        let result = WebSearch::new(&config(&server)).unwrap().fetch("rust").await;
        assert_eq!(result.error_kind(), Some(ErrorKind::UpstreamError));
    }
}
