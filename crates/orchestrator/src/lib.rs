//! Query routing for the search agent.
//!
//! A query goes through three steps:
//!
//! ```text
//! query
//!   ↓
//! IntentClassifier  (local model, one call)  → IntentDecision
//!   ↓
//! Router            (exhaustive match)        → one Agent::fetch
//!   ↓
//! formatting        (Success as-is, Failure → "Error: ...")
//!   ↓
//! answer string
//! ```
//!
//! [`run_session`] drives the router from any line source.
//!
//! # Example
//!
//! ```rust,ignore
//! use agent_tools::{AgentTable, AgentsConfig};
//! use local_brain::LocalBrainConfig;
//! use orchestrator::{IntentClassifier, Router};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let classifier = IntentClassifier::new(LocalBrainConfig::from_env()?)?;
//!     let agents = AgentTable::from_config(&AgentsConfig::from_env()?, None)?;
//!     let router = Router::new(classifier, agents);
//!
//!     println!("{}", router.route("What's the price of bitcoin?").await);
//!     Ok(())
//! }
//! ```

mod classifier;
mod error;
pub mod formatting;
mod intent;
mod router;
mod session;

pub use classifier::{
    load_classifier_prompt, parse_decision, IntentClassifier, DEFAULT_CLASSIFIER_PROMPT,
    DEFAULT_CLASSIFIER_PROMPT_FILE,
};
pub use error::OrchestratorError;
pub use intent::IntentDecision;
pub use router::Router;
pub use session::{is_exit_command, run_session, BANNER};
