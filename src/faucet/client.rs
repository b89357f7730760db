//! Faucet service client.

use async_trait::async_trait;
use std::time::Duration;

use crate::chain::TransportError;
use crate::faucet::types::{FaucetInfo, TransferRequest, TransferResponse};

/// Requests funds from a faucet.
#[async_trait]
pub trait FaucetClient: Send + Sync {
    async fn transfer(&self, request: TransferRequest) -> Result<TransferResponse, TransportError>;
}

/// Faucet client speaking the faucet's JSON-over-HTTP protocol.
#[derive(Debug, Clone)]
pub struct HttpFaucetClient {
    client: reqwest::Client,
    address: String,
}

impl HttpFaucetClient {
    /// Create a client for the faucet at `address`.
    pub fn new(address: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            address: address.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Ask the faucet to describe itself.
    pub async fn faucet_info(&self) -> Result<FaucetInfo, TransportError> {
        let resp = self
            .client
            .get(format!("{}/info", self.address))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TransportError::new(format!("faucet returned status {}", status)));
        }
        Ok(resp.json().await?)
    }
}

#[async_trait]
impl FaucetClient for HttpFaucetClient {
    async fn transfer(&self, request: TransferRequest) -> Result<TransferResponse, TransportError> {
        let resp = self
            .client
            .post(format!("{}/", self.address))
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        // Error replies carry a JSON body with the reason; prefer it over the status.
        match serde_json::from_str::<TransferResponse>(&text) {
            Ok(body) if status.is_success() || !body.error.is_empty() => Ok(body),
            _ if status.is_success() => Err(TransportError::new(format!(
                "faucet returned malformed body: {}",
                text
            ))),
            _ => Err(TransportError::new(format!(
                "faucet returned status {}: {}",
                status, text
            ))),
        }
    }
}
