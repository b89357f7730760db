//! Faucet wire types and funding errors.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::chain::TransportError;

/// Request body sent to the faucet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Address to fund.
    pub address: String,
    /// Coins to request (e.g. `10token`). Empty lets the faucet choose.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coins: Vec<String>,
}

impl TransferRequest {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            coins: Vec::new(),
        }
    }
}

/// Faucet reply. A non-empty `error` is a logical failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferResponse {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error: String,
}

/// Faucet self-description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaucetInfo {
    #[serde(default)]
    pub is_a_faucet: bool,
    #[serde(default)]
    pub chain_id: String,
}

/// Why an account could not be funded.
#[derive(Debug, Error)]
pub enum FundingError {
    /// The faucet could not be reached.
    #[error("cannot retrieve funds from faucet: {0}")]
    FaucetUnreachable(#[source] TransportError),

    /// The faucet answered with an error.
    #[error("cannot retrieve funds from faucet: {0}")]
    FaucetRejected(String),

    /// Funds did not land before the deadline.
    #[error(
        "account {address} has not enough {denom:?} balance after {waited:?}, min. required amount: {min_amount}"
    )]
    Timeout {
        address: String,
        denom: String,
        min_amount: u64,
        waited: Duration,
        last_error: Option<String>,
    },

    /// The caller cancelled while waiting for funds.
    #[error("faucet funding cancelled")]
    Cancelled,
}

impl FundingError {
    /// True when the faucet itself failed, as opposed to the wait.
    pub fn is_faucet_failure(&self) -> bool {
        matches!(self, FundingError::FaucetUnreachable(_) | FundingError::FaucetRejected(_))
    }
}
