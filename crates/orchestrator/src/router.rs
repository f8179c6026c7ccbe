//! Query routing: classify, dispatch to one agent, format.

use agent_tools::AgentTable;
use tracing::{info, warn};

use crate::classifier::IntentClassifier;
use crate::error::OrchestratorError;
use crate::formatting::{
    format_result, CLASSIFIER_UNAVAILABLE_MESSAGE, EMPTY_QUERY_MESSAGE, UNKNOWN_REQUEST_MESSAGE,
};

/// Routes each query to at most one agent and returns the text to show.
pub struct Router {
    classifier: IntentClassifier,
    agents: AgentTable,
}

impl Router {
    pub fn new(classifier: IntentClassifier, agents: AgentTable) -> Self {
        Self {
            classifier,
            agents,
        }
    }

    /// The agent table this router dispatches to.
    pub fn agents(&self) -> &AgentTable {
        &self.agents
    }

    /// The classifier this router uses.
    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    /// Route a query and return the user-facing answer.
    ///
    /// Never fails: classifier and agent errors become messages.
    pub async fn route(&self, query: &str) -> String {
        let decision = match self.classifier.classify(query).await {
            Ok(decision) => decision,
            Err(OrchestratorError::InvalidInput(_)) => return EMPTY_QUERY_MESSAGE.to_string(),
            Err(e) => {
                warn!(error = %e, "CLASSIFIER_FAILED");
                return CLASSIFIER_UNAVAILABLE_MESSAGE.to_string();
            }
        };

        let Some((kind, parameter)) = decision.target() else {
            info!("No agent matched; returning fallback");
            return UNKNOWN_REQUEST_MESSAGE.to_string();
        };

        let result = self.agents.dispatch(kind, parameter).await;
        info!(agent = %kind, success = result.is_success(), "Agent finished");
        format_result(kind, result)
    }
}
