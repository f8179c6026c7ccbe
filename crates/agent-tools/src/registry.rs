//! Agent table: one adapter per [`AgentKind`], resolved by exhaustive match.

use std::sync::Arc;

use brain_core::Brain;
use tracing::{debug, info};

use crate::agent::{Agent, AgentKind, AgentResult};
use crate::config::{AgentsConfig, ConfigError};
use crate::tools::{CryptoPrice, StockQuote, Weather, WebSearch};

/// Table mapping every agent kind to exactly one adapter.
///
/// The table is built once at startup and never changes. Lookups cannot
/// miss: each [`AgentKind`] has a field.
#[derive(Clone)]
pub struct AgentTable {
    crypto: Arc<dyn Agent>,
    stock: Arc<dyn Agent>,
    weather: Arc<dyn Agent>,
    web_search: Arc<dyn Agent>,
}

impl AgentTable {
    /// Build a table from explicit adapters.
    pub fn new(
        crypto: Arc<dyn Agent>,
        stock: Arc<dyn Agent>,
        weather: Arc<dyn Agent>,
        web_search: Arc<dyn Agent>,
    ) -> Self {
        Self {
            crypto,
            stock,
            weather,
            web_search,
        }
    }

    /// Build the built-in adapters from configuration.
    ///
    /// `summarizer`, when present, is used by web search to summarize results.
    pub fn from_config(
        config: &AgentsConfig,
        summarizer: Option<Arc<dyn Brain>>,
    ) -> Result<Self, ConfigError> {
        let web_search = match summarizer {
            Some(brain) => WebSearch::with_summarizer(&config.web_search, brain)?,
            None => WebSearch::new(&config.web_search)?,
        };

        let table = Self::new(
            Arc::new(CryptoPrice::new(&config.crypto)?),
            Arc::new(StockQuote::new(&config.stock)?),
            Arc::new(Weather::new(&config.weather)?),
            Arc::new(web_search),
        );

        for (name, _) in table.descriptions() {
            info!("Registered agent: {}", name);
        }
        Ok(table)
    }

    /// The adapter for `kind`.
    pub fn get(&self, kind: AgentKind) -> &dyn Agent {
        match kind {
            AgentKind::Crypto => self.crypto.as_ref(),
            AgentKind::Stock => self.stock.as_ref(),
            AgentKind::Weather => self.weather.as_ref(),
            AgentKind::WebSearch => self.web_search.as_ref(),
        }
    }

    /// Run the adapter for `kind` with `parameter`.
    pub async fn dispatch(&self, kind: AgentKind, parameter: &str) -> AgentResult {
        let agent = self.get(kind);
        debug!("Dispatching {} to agent '{}'", kind, agent.name());
        agent.fetch(parameter).await
    }

    /// Names and descriptions of every adapter, in [`AgentKind::ALL`] order.
    pub fn descriptions(&self) -> Vec<(&str, &str)> {
        AgentKind::ALL
            .iter()
            .map(|kind| {
                let agent = self.get(*kind);
                (agent.name(), agent.description())
            })
            .collect()
    }
}
