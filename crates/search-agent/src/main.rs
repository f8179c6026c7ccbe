use std::sync::Arc;

use agent_tools::{AgentTable, AgentsConfig};
use local_brain::{LocalBrain, LocalBrainConfig};
use orchestrator::{run_session, IntentClassifier, Router};
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Sampling for web-result summaries.
const SUMMARY_TEMPERATURE: f32 = 0.3;
const SUMMARY_MAX_TOKENS: u32 = 300;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    // Logs go to stderr; stdout carries the conversation
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let llm_config = LocalBrainConfig::from_env()?;
    let agents_config = AgentsConfig::from_env()?;

    for var in agents_config.missing_credentials() {
        warn!("{} is not set; queries needing it will report a configuration error", var);
    }

    let summarizer = LocalBrain::new(LocalBrainConfig {
        system_prompt: None,
        temperature: Some(SUMMARY_TEMPERATURE),
        max_tokens: Some(SUMMARY_MAX_TOKENS),
        ..llm_config.clone()
    })?;
    let agents = AgentTable::from_config(&agents_config, Some(Arc::new(summarizer)))?;
    for (name, description) in agents.descriptions() {
        info!("Agent {}: {}", name, description);
    }

    info!(
        "Using local model '{}' at {}",
        llm_config.model, llm_config.api_url
    );
    let classifier = IntentClassifier::new(llm_config)?;
    let router = Router::new(classifier, agents);

    run_session(&router, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await?;

    Ok(())
}
