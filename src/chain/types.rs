//! Chain-facing types shared by the transport seam.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Transport-level failure (network, serialization, node unavailable).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        Self::new(e.to_string())
    }
}

/// When a broadcast call returns relative to block inclusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BroadcastMode {
    /// Return after CheckTx.
    Sync,
    /// Return immediately after the node accepts the bytes.
    Async,
    /// Return after the transaction is committed in a block.
    #[default]
    Block,
}

impl std::fmt::Display for BroadcastMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mode = match self {
            BroadcastMode::Sync => "sync",
            BroadcastMode::Async => "async",
            BroadcastMode::Block => "block",
        };
        f.write_str(mode)
    }
}

/// Subset of the node status the client consumes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NodeStatus {
    /// Network identifier, used as chain id.
    pub network: String,
    /// Height of the latest committed block.
    pub latest_block_height: i64,
    /// Whether the node is still syncing.
    #[serde(default)]
    pub catching_up: bool,
}

/// Raw result of a submitted or queried transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TxResponse {
    pub height: i64,
    pub txhash: String,
    pub codespace: String,
    /// Zero on success; any other value is an application-level failure.
    pub code: u32,
    /// Hex-encoded `TxMsgData` envelope.
    pub data: String,
    pub raw_log: String,
    pub gas_wanted: i64,
    pub gas_used: i64,
}

impl TxResponse {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

/// Result of simulating a transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SimulateResponse {
    pub gas_wanted: u64,
    pub gas_used: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcast_mode_serde() {
        let mode: BroadcastMode = serde_json::from_str("\"sync\"").unwrap();
        assert_eq!(mode, BroadcastMode::Sync);
        assert_eq!(BroadcastMode::default(), BroadcastMode::Block);
        assert_eq!(BroadcastMode::Async.to_string(), "async");
    }

    #[test]
    fn test_tx_response_partial_json() {
        let resp: TxResponse = serde_json::from_str(r#"{"code": 5, "raw_log": "out of gas"}"#).unwrap();
        assert!(!resp.is_success());
        assert_eq!(resp.raw_log, "out of gas");
        assert_eq!(resp.height, 0);
    }
}
