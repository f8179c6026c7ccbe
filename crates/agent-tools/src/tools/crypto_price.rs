//! Cryptocurrency price adapter using the CoinGecko API.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{capitalize, http_client, parse_json, send};
use crate::agent::Agent;
use crate::config::{AdapterConfig, ConfigError};
use crate::error::AgentError;

const SERVICE: &str = "CoinGecko";

#[derive(Debug, Deserialize)]
struct PriceData {
    usd: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct CoinGeckoError {
    error: String,
}

/// Cryptocurrency price adapter.
///
/// Looks up the USD price of a CoinGecko coin id. Public API, no key.
///
/// The parameter is a coin *name* as CoinGecko spells its ids:
/// `bitcoin`, `ethereum`, `bitcoin-cash`, `avalanche-2`. Spaces are turned
/// into hyphens, so "bitcoin cash" works too.
pub struct CryptoPrice {
    client: reqwest::Client,
    base_url: String,
}

impl CryptoPrice {
    /// Create a new crypto price adapter.
    pub fn new(config: &AdapterConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            client: http_client(config.timeout)?,
            base_url: config.base_url.clone(),
        })
    }

    /// Normalize and validate a coin id.
    fn coin_id(parameter: &str) -> Result<String, AgentError> {
        let coin = parameter
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
            .to_lowercase();

        if coin.is_empty() {
            return Err(AgentError::InvalidInput(
                "Please name a cryptocurrency, like 'bitcoin'.".to_string(),
            ));
        }

        let valid = coin
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !valid {
            return Err(AgentError::InvalidInput(format!(
                "Invalid cryptocurrency format '{}' - use names like 'bitcoin' not symbols.",
                parameter.trim()
            )));
        }

        Ok(coin)
    }
}

#[async_trait]
impl Agent for CryptoPrice {
    fn name(&self) -> &str {
        "crypto_price"
    }

    fn description(&self) -> &str {
        "Current USD price of a cryptocurrency from CoinGecko."
    }

    async fn lookup(&self, parameter: &str) -> Result<String, AgentError> {
        let coin = Self::coin_id(parameter)?;
        let url = format!("{}/simple/price", self.base_url);

        debug!("Fetching crypto price for '{}' from {}", coin, url);

        let request = self
            .client
            .get(&url)
            .query(&[("ids", coin.as_str()), ("vs_currencies", "usd")]);
        let (status, body) = send(SERVICE, request).await?;

        if !status.is_success() {
            let detail = serde_json::from_str::<CoinGeckoError>(&body)
                .map(|e| e.error)
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("CoinGecko returned {}: {}", status, detail);
            return Err(AgentError::upstream(
                SERVICE,
                format!("status {}: {}", status.as_u16(), detail),
            ));
        }

        let prices: HashMap<String, PriceData> = parse_json(SERVICE, &body)?;

        let data = prices
            .get(&coin)
            .ok_or_else(|| AgentError::NotFound(format!("Unknown cryptocurrency: {}", coin)))?;

        let price = data.usd.ok_or_else(|| {
            AgentError::NotFound(format!("Price data not available for {}", coin))
        })?;

        Ok(format!("{}: ${} USD", capitalize(&coin), price))
    }
}
