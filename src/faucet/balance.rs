//! Bank balance lookups.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::chain::TransportError;

/// Reads the balance of one denomination for an address.
#[async_trait]
pub trait BalanceQuery: Send + Sync {
    async fn balance(&self, address: &str, denom: &str) -> Result<u128, TransportError>;
}

#[derive(Debug, Deserialize)]
struct BalanceResponse {
    balance: Option<BalanceCoin>,
}

#[derive(Debug, Deserialize)]
struct BalanceCoin {
    amount: String,
}

/// Balance query against the node's REST API (bank module).
#[derive(Debug, Clone)]
pub struct RestBalanceQuery {
    client: reqwest::Client,
    api_address: String,
}

impl RestBalanceQuery {
    pub fn new(api_address: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_address: api_address.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl BalanceQuery for RestBalanceQuery {
    async fn balance(&self, address: &str, denom: &str) -> Result<u128, TransportError> {
        let resp = self
            .client
            .get(format!(
                "{}/cosmos/bank/v1beta1/balances/{}/by_denom",
                self.api_address, address
            ))
            .query(&[("denom", denom)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(TransportError::new(format!(
                "balance query returned status {}: {}",
                status, text
            )));
        }

        let body: BalanceResponse = resp.json().await?;
        match body.balance {
            Some(coin) => coin.amount.parse::<u128>().map_err(|e| {
                TransportError::new(format!("invalid balance amount {:?}: {}", coin.amount, e))
            }),
            None => Ok(0),
        }
    }
}
