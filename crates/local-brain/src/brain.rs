//! LocalBrain implementation over the chat-completions API.

use brain_core::{async_trait, prompt_fingerprint, Brain, BrainError, InboundMessage, OutboundMessage};
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::api_types::{ApiError, ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::config::LocalBrainConfig;

/// A brain backed by a local, OpenAI-compatible inference server.
///
/// Stateless: each call carries the system prompt (or the message's own
/// instructions) and a single user message.
pub struct LocalBrain {
    client: Client,
    config: LocalBrainConfig,
    system_prompt_fingerprint: Option<String>,
}

impl LocalBrain {
    /// Create a new LocalBrain with the given configuration.
    pub fn new(config: LocalBrainConfig) -> Result<Self, BrainError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BrainError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        let system_prompt_fingerprint = config.system_prompt.as_deref().map(prompt_fingerprint);

        info!(
            "LocalBrain initialized: url={}, model={}, timeout={:?}",
            config.api_url, config.model, config.timeout
        );

        Ok(Self {
            client,
            config,
            system_prompt_fingerprint,
        })
    }

    /// Create a LocalBrain from environment variables.
    ///
    /// See [`LocalBrainConfig::from_env`] for the variables read.
    pub fn from_env() -> Result<Self, BrainError> {
        Self::new(LocalBrainConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &LocalBrainConfig {
        &self.config
    }

    /// Fingerprint of the configured system prompt, if any.
    pub fn system_prompt_fingerprint(&self) -> Option<&str> {
        self.system_prompt_fingerprint.as_deref()
    }

    fn build_messages(&self, message: &InboundMessage) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(2);

        let system = message
            .instructions
            .as_ref()
            .or(self.config.system_prompt.as_ref());
        if let Some(system) = system {
            messages.push(ChatMessage::system(system.clone()));
        }

        messages.push(ChatMessage::user(message.text.clone()));
        messages
    }

    async fn chat_completion(
        &self,
        messages: Vec<ChatMessage>,
    ) -> Result<ChatCompletionResponse, BrainError> {
        let url = self.config.completions_url();

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            stream: false,
        };

        debug!("Sending completion request to {}", url);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            let detail = serde_json::from_str::<ApiError>(&error_text)
                .map(|api_error| api_error.error.message)
                .unwrap_or(error_text);

            return Err(BrainError::ProcessingFailed(format!(
                "inference server error ({}): {}",
                status.as_u16(),
                detail
            )));
        }

        let body = response.text().await.map_err(classify_send_error)?;
        let completion: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| BrainError::ProcessingFailed(format!("Failed to parse response: {}", e)))?;

        if let Some(usage) = &completion.usage {
            debug!(
                "Token usage ({}) - prompt: {}, completion: {}, total: {}",
                completion.model.as_deref().unwrap_or(&self.config.model),
                usage.prompt_tokens,
                usage.completion_tokens,
                usage.total_tokens
            );
        }

        Ok(completion)
    }
}

/// Map a transport error onto the brain error taxonomy.
fn classify_send_error(err: reqwest::Error) -> BrainError {
    if err.is_timeout() {
        BrainError::Timeout(err.to_string())
    } else {
        BrainError::Network(err.to_string())
    }
}

#[async_trait]
impl Brain for LocalBrain {
    async fn process(&self, message: InboundMessage) -> Result<OutboundMessage, BrainError> {
        debug!("Processing message from {}", message.sender);

        let messages = self.build_messages(&message);
        let completion = self.chat_completion(messages).await?;

        let choice = completion.choices.first();
        let text = choice
            .and_then(|c| c.message.content.as_deref())
            .map(str::trim)
            .unwrap_or_default()
            .to_string();

        if text.is_empty() {
            warn!(
                finish_reason = ?choice.and_then(|c| c.finish_reason.as_deref()),
                "Local model returned no content"
            );
        }

        Ok(OutboundMessage::reply_to(&message, text))
    }

    fn name(&self) -> &str {
        "LocalBrain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_brain(base_url: &str) -> LocalBrain {
        let config = LocalBrainConfig::builder()
            .api_url(base_url)
            .system_prompt("You are a router")
            .temperature(0.1)
            .max_tokens(100)
            .timeout(Duration::from_millis(300))
            .build();
        LocalBrain::new(config).unwrap()
    }

    fn completion(content: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "model": "local-model",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }]
        })
    }

    #[tokio::test]
    async fn test_process_sends_prompt_and_returns_trimmed_text() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_partial_json(serde_json::json!({
                "temperature": 0.1,
                "max_tokens": 100,
                "messages": [
                    {"role": "system", "content": "You are a router"},
                    {"role": "user", "content": "bitcoin price"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("  [crypto_asset] bitcoin\n")))
            .expect(1)
            .mount(&server)
            .await;

        let brain = test_brain(&server.uri());
        let reply = brain
            .process(InboundMessage::direct("classifier", "bitcoin price"))
            .await
            .unwrap();

        assert_eq!(reply.text, "[crypto_asset] bitcoin");
        assert_eq!(reply.recipient, "classifier");
    }

    #[tokio::test]
    async fn test_instructions_replace_system_prompt() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({
                "messages": [{"role": "system", "content": "Summarize"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("summary")))
            .expect(1)
            .mount(&server)
            .await;

        let brain = test_brain(&server.uri());
        let reply = brain
            .process(InboundMessage::direct("summarizer", "results").with_instructions("Summarize"))
            .await
            .unwrap();
        assert_eq!(reply.text, "summary");
    }

    #[tokio::test]
    async fn test_server_error_is_processing_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "error": {"message": "No models loaded"}
            })))
            .mount(&server)
            .await;

        let err = test_brain(&server.uri())
            .process(InboundMessage::direct("classifier", "hi"))
            .await
            .unwrap_err();

        match err {
            BrainError::ProcessingFailed(msg) => assert!(msg.contains("No models loaded")),
            other => panic!("expected ProcessingFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_slow_server_times_out() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion("late"))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let err = test_brain(&server.uri())
            .process(InboundMessage::direct("classifier", "hi"))
            .await
            .unwrap_err();

        assert!(matches!(err, BrainError::Timeout(_)));
        assert!(err.is_unreachable());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        // Nothing listens on port 9 (discard) in the test environment.
        let err = test_brain("http://127.0.0.1:9")
            .process(InboundMessage::direct("classifier", "hi"))
            .await
            .unwrap_err();

        assert!(err.is_unreachable());
    }

    #[tokio::test]
    async fn test_missing_content_yields_empty_text() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": null}}]
            })))
            .mount(&server)
            .await;

        let reply = test_brain(&server.uri())
            .process(InboundMessage::direct("classifier", "hi"))
            .await
            .unwrap();
        assert!(reply.text.is_empty());
    }

    #[tokio::test]
    async fn test_partial_usage_is_accepted() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "model": "qwen2.5-7b-instruct",
                "choices": [{"message": {"role": "assistant", "content": "[stock_asset] AAPL"}}],
                "usage": {"completion_tokens": 6}
            })))
            .mount(&server)
            .await;

        let reply = test_brain(&server.uri())
            .process(InboundMessage::direct("classifier", "apple stock"))
            .await
            .unwrap();
        assert_eq!(reply.text, "[stock_asset] AAPL");
    }

    #[test]
    fn test_fingerprint_tracks_system_prompt() {
        let brain = test_brain("http://localhost:1234");
        assert_eq!(
            brain.system_prompt_fingerprint(),
            Some(prompt_fingerprint("You are a router").as_str())
        );
        assert_eq!(brain.name(), "LocalBrain");
    }
}
