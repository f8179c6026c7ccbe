//! Intent classification using the local model.

use std::env;
use std::path::Path;
use std::sync::Arc;

use agent_tools::AgentKind;
use brain_core::{prompt_fingerprint, Brain, InboundMessage};
use local_brain::{LocalBrain, LocalBrainConfig};
use tracing::{debug, info, trace};

use crate::error::OrchestratorError;
use crate::intent::IntentDecision;

/// Default path for the classifier prompt file.
pub const DEFAULT_CLASSIFIER_PROMPT_FILE: &str = "CLASSIFIER_PROMPT.md";

/// Default classifier system prompt (fallback if no file or env var).
pub const DEFAULT_CLASSIFIER_PROMPT: &str = r#"You are a routing assistant. Format responses STRICTLY as:
[agent_type] query

Available agents:
- crypto_asset: Cryptocurrency prices (e.g., "[crypto_asset] ethereum")
- stock_asset: Stock prices (e.g., "[stock_asset] tsla")
- weather_asset: Weather (e.g., "[weather_asset] tokyo")
- web_asset: Web searches (e.g., "[web_asset] pixel 9 reviews")

Use the full coin name for cryptocurrencies, the ticker symbol for stocks and
the city name for weather. If no agent fits, reply with [unknown].
NEVER include text outside this format!"#;

const CLASSIFIER_TEMPERATURE: f32 = 0.1;
const CLASSIFIER_MAX_TOKENS: u32 = 100;

/// Load the classifier system prompt.
///
/// Priority:
/// 1. `CLASSIFIER_SYSTEM_PROMPT` env var (if set and non-blank)
/// 2. Contents of prompt file (`CLASSIFIER_PROMPT_FILE` or default `CLASSIFIER_PROMPT.md`)
/// 3. Embedded default prompt
pub fn load_classifier_prompt() -> String {
    if let Ok(prompt) = env::var("CLASSIFIER_SYSTEM_PROMPT") {
        if !prompt.trim().is_empty() {
            info!("Using classifier prompt from CLASSIFIER_SYSTEM_PROMPT env var");
            return prompt.trim().to_string();
        }
    }

    let prompt_file = env::var("CLASSIFIER_PROMPT_FILE")
        .unwrap_or_else(|_| DEFAULT_CLASSIFIER_PROMPT_FILE.to_string());

    if let Some(prompt) = load_prompt_file(&prompt_file) {
        info!("Loaded classifier prompt from {}", prompt_file);
        return prompt;
    }

    info!("Using embedded default classifier prompt");
    DEFAULT_CLASSIFIER_PROMPT.to_string()
}

/// Returns the trimmed file content, or `None` if missing, unreadable or blank.
fn load_prompt_file(path: impl AsRef<Path>) -> Option<String> {
    let content = std::fs::read_to_string(path.as_ref()).ok()?;
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Classifies queries into an [`IntentDecision`] with one model call.
///
/// Stateless and single-shot: no history, no retry.
pub struct IntentClassifier {
    brain: Arc<dyn Brain>,
    prompt: String,
    prompt_fingerprint: String,
}

impl IntentClassifier {
    /// Create a classifier backed by the local model.
    ///
    /// The prompt is loaded with [`load_classifier_prompt`]; temperature and
    /// token limit are overridden for short, near-deterministic replies.
    pub fn new(mut config: LocalBrainConfig) -> Result<Self, OrchestratorError> {
        let prompt = load_classifier_prompt();
        config.system_prompt = Some(prompt.clone());
        config.temperature = Some(CLASSIFIER_TEMPERATURE);
        config.max_tokens = Some(CLASSIFIER_MAX_TOKENS);

        let brain = LocalBrain::new(config).map_err(|e| {
            OrchestratorError::Configuration(format!("failed to initialize classifier brain: {}", e))
        })?;

        Ok(Self::with_prompt(Arc::new(brain), prompt))
    }

    /// Create a classifier over any brain, using the embedded default prompt.
    pub fn with_brain(brain: Arc<dyn Brain>) -> Self {
        Self::with_prompt(brain, DEFAULT_CLASSIFIER_PROMPT)
    }

    /// Create a classifier over any brain with an explicit prompt.
    pub fn with_prompt(brain: Arc<dyn Brain>, prompt: impl Into<String>) -> Self {
        let prompt = prompt.into();
        let prompt_fingerprint = prompt_fingerprint(&prompt);
        info!(
            "Classifier prompt fingerprint: {} (brain: {})",
            prompt_fingerprint,
            brain.name()
        );
        Self {
            brain,
            prompt,
            prompt_fingerprint,
        }
    }

    /// Fingerprint of the active prompt.
    pub fn prompt_fingerprint(&self) -> &str {
        &self.prompt_fingerprint
    }

    /// Classify a query.
    ///
    /// Blank queries fail with `InvalidInput` without calling the model. Any
    /// model failure is `ClassifierUnavailable`. A reply that names no known
    /// agent is `Ok(IntentDecision::Unknown)`.
    pub async fn classify(&self, query: &str) -> Result<IntentDecision, OrchestratorError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(OrchestratorError::InvalidInput("empty query".to_string()));
        }

        let inbound =
            InboundMessage::direct("classifier", query).with_instructions(self.prompt.clone());
        let response = self.brain.process(inbound).await?;

        trace!(raw_response = %response.text, "CLASSIFIER_RAW_RESPONSE");

        let decision = parse_decision(&response.text);
        info!("Classified query as {}", decision);
        Ok(decision)
    }
}

/// Parse the model's reply into a decision.
///
/// Accepts `[agent] parameter`, `agent parameter` / `agent: parameter`, and
/// the agent and parameter on consecutive lines. Short aliases such as
/// `weather` are accepted only in brackets. Anything else is `Unknown`.
pub fn parse_decision(reply: &str) -> IntentDecision {
    let mut lines = reply
        .lines()
        .map(|line| line.trim().trim_matches('`').trim())
        .filter(|line| !line.is_empty());

    let Some(first) = lines.next() else {
        return IntentDecision::Unknown;
    };

    // Short aliases only count inside brackets
    let (tag, rest, bracketed) = split_tag(first);
    let kind = if bracketed {
        AgentKind::from_tag(tag)
    } else {
        AgentKind::from_full_tag(tag)
    };
    let Some(kind) = kind else {
        debug!("Unrecognized agent tag '{}'", tag);
        return IntentDecision::Unknown;
    };

    let parameter = if rest.is_empty() {
        lines.next().unwrap_or_default()
    } else {
        rest
    };

    IntentDecision::new(kind, clean_parameter(parameter))
}

/// Split the leading agent tag from the rest of the line. The flag is set
/// when the tag was written in brackets.
fn split_tag(line: &str) -> (&str, &str, bool) {
    if let Some(inner) = line.strip_prefix('[') {
        if let Some(end) = inner.find(']') {
            return (inner[..end].trim(), inner[end + 1..].trim(), true);
        }
    }

    match line.find(|c: char| c.is_whitespace() || c == ':') {
        Some(idx) => (
            &line[..idx],
            line[idx..].trim_start_matches(':').trim(),
            false,
        ),
        None => (line, "", false),
    }
}

/// Drop a trailing parenthetical and surrounding quotes.
fn clean_parameter(parameter: &str) -> &str {
    let parameter = match parameter.find('(') {
        Some(idx) => &parameter[..idx],
        None => parameter,
    };
    parameter.trim().trim_matches(|c: char| c == '"' || c == '\'').trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mock_brain::{FailingBrain, ScriptedBrain};

    #[test]
    fn test_parse_bracketed() {
        assert_eq!(
            parse_decision("[crypto_asset] bitcoin"),
            IntentDecision::Crypto("bitcoin".into())
        );
        assert_eq!(
            parse_decision("  [STOCK_ASSET]   TSLA \n"),
            IntentDecision::Stock("TSLA".into())
        );
        assert_eq!(
            parse_decision("[web_asset] pixel 9 reviews"),
            IntentDecision::WebSearch("pixel 9 reviews".into())
        );
    }

    #[test]
    fn test_parse_bare_prefix_and_aliases() {
        assert_eq!(
            parse_decision("weather_asset Tokyo"),
            IntentDecision::Weather("Tokyo".into())
        );
        assert_eq!(
            parse_decision("weather_asset: Paris"),
            IntentDecision::Weather("Paris".into())
        );
        assert_eq!(
            parse_decision("[web_search] best rust books"),
            IntentDecision::WebSearch("best rust books".into())
        );
        assert_eq!(
            parse_decision("[Crypto] dogecoin"),
            IntentDecision::Crypto("dogecoin".into())
        );
    }

    #[test]
    fn test_parse_prose_starting_with_alias_is_unknown() {
        for reply in [
            "Weather data is not something I can infer from that.",
            "Web pages about that term do not exist.",
            "Stock markets are closed today.",
            "Crypto is a broad topic.",
            "weather: Paris",
            "web_search best rust books",
            "stock\nAAPL",
        ] {
            assert_eq!(parse_decision(reply), IntentDecision::Unknown, "reply: {:?}", reply);
        }
    }

    #[test]
    fn test_parse_two_line_form() {
        assert_eq!(
            parse_decision("[crypto_asset]\nethereum"),
            IntentDecision::Crypto("ethereum".into())
        );
        assert_eq!(
            parse_decision("stock_asset\n\n  AAPL"),
            IntentDecision::Stock("AAPL".into())
        );
    }

    #[test]
    fn test_parse_cleans_parameter() {
        assert_eq!(
            parse_decision("[weather_asset] tokyo (japan)"),
            IntentDecision::Weather("tokyo".into())
        );
        assert_eq!(
            parse_decision("[crypto_asset] \"solana\""),
            IntentDecision::Crypto("solana".into())
        );
        assert_eq!(
            parse_decision("`[stock_asset] BRK.B`"),
            IntentDecision::Stock("BRK.B".into())
        );
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(parse_decision(""), IntentDecision::Unknown);
        assert_eq!(parse_decision("[unknown]"), IntentDecision::Unknown);
        assert_eq!(parse_decision("[calculator] 2+2"), IntentDecision::Unknown);
        assert_eq!(parse_decision("[crypto_asset]"), IntentDecision::Unknown);
        assert_eq!(parse_decision("[crypto_asset] (none)"), IntentDecision::Unknown);
        assert_eq!(
            parse_decision("I'm not sure what you mean."),
            IntentDecision::Unknown
        );
    }

    #[tokio::test]
    async fn test_classify_sends_prompt() {
        let brain = Arc::new(ScriptedBrain::replying("[crypto_asset] bitcoin"));
        let classifier = IntentClassifier::with_brain(brain.clone());

        let decision = classifier
            .classify("  What's the price of bitcoin?  ")
            .await
            .unwrap();
        assert_eq!(decision, IntentDecision::Crypto("bitcoin".into()));

        let sent = brain.received();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].text, "What's the price of bitcoin?");
        assert_eq!(sent[0].instructions.as_deref(), Some(DEFAULT_CLASSIFIER_PROMPT));
        assert_eq!(
            classifier.prompt_fingerprint(),
            prompt_fingerprint(DEFAULT_CLASSIFIER_PROMPT)
        );
    }

    #[tokio::test]
    async fn test_classify_blank_query() {
        let brain = Arc::new(ScriptedBrain::replying("[web_asset] x"));
        let classifier = IntentClassifier::with_brain(brain.clone());

        let result = classifier.classify(" \t ").await;
        assert!(matches!(result, Err(OrchestratorError::InvalidInput(_))));
        assert_eq!(brain.call_count(), 0);
    }

    #[tokio::test]
    async fn test_classify_unreachable_model() {
        let brain = Arc::new(FailingBrain::unreachable());
        let classifier = IntentClassifier::with_brain(brain.clone());

        let result = classifier.classify("weather in Oslo").await;
        assert!(matches!(
            result,
            Err(OrchestratorError::ClassifierUnavailable(_))
        ));
        assert_eq!(brain.call_count(), 1);
    }

    // One test for all env scenarios: env vars are process-global.
    #[test]
    fn test_load_classifier_prompt_priority() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        let dir = env::temp_dir().join(format!("classifier-prompt-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("prompt.md");
        std::fs::write(&file, "  prompt from file \n").unwrap();

        env::remove_var("CLASSIFIER_SYSTEM_PROMPT");
        env::set_var("CLASSIFIER_PROMPT_FILE", dir.join("missing.md"));
        assert_eq!(load_classifier_prompt(), DEFAULT_CLASSIFIER_PROMPT);

        env::set_var("CLASSIFIER_PROMPT_FILE", &file);
        assert_eq!(load_classifier_prompt(), "prompt from file");

        env::set_var("CLASSIFIER_SYSTEM_PROMPT", "prompt from env");
        assert_eq!(load_classifier_prompt(), "prompt from env");

        env::set_var("CLASSIFIER_SYSTEM_PROMPT", "   ");
        assert_eq!(load_classifier_prompt(), "prompt from file");

        env::remove_var("CLASSIFIER_SYSTEM_PROMPT");
        env::remove_var("CLASSIFIER_PROMPT_FILE");
        let _ = std::fs::remove_dir_all(&dir);
    }
}
