//! Error taxonomy for the transaction lifecycle.
//!
//! Every failure is returned to the caller; nothing here retries or exits the
//! process. Focused error enums live next to the code that raises them and are
//! folded into [`ClientError`] through `#[from]`.

use std::time::Duration;
use thiserror::Error;

use crate::address::AddressError;
use crate::account::KeyringError;
use crate::chain::TransportError;
use crate::config::ConfigError;
use crate::faucet::FundingError;
use crate::tx::DecodeError;

/// Errors surfaced by [`crate::Client`] and the components it orchestrates.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Gas setting is neither an unsigned integer nor `auto`.
    #[error("invalid gas value {0:?}: expected an unsigned integer or \"auto\"")]
    InvalidGasValue(String),

    /// Fee or gas price string could not be parsed.
    #[error("invalid coins {value:?}: {reason}")]
    InvalidCoins { value: String, reason: String },

    /// No home directory configured and none could be derived.
    #[error("cannot determine home directory for chain {0:?}")]
    MissingHomeDir(String),

    /// A required collaborator or setting was not supplied.
    #[error("configuration error: {0}")]
    Config(String),

    /// Configuration file could not be loaded.
    #[error(transparent)]
    ConfigFile(#[from] ConfigError),

    /// Neither a key name nor an address matched.
    #[error("account {0:?} not found in keyring")]
    AccountNotFound(String),

    /// Key exists locally but the chain has no account for it.
    #[error("account {address} does not exist on chain: {source}")]
    AccountNotOnChain {
        address: String,
        #[source]
        source: TransportError,
    },

    /// Address derivation or decoding failed.
    #[error(transparent)]
    Address(#[from] AddressError),

    /// Keyring lookup or signing failed.
    #[error(transparent)]
    Keyring(#[from] KeyringError),

    /// Faucet funding did not complete.
    #[error(transparent)]
    Funding(#[from] FundingError),

    /// Gas estimation through simulation failed.
    #[error("gas simulation failed: {0}")]
    Simulation(String),

    /// Transport-level failure while talking to the node.
    #[error("error while requesting node '{node}': {source}")]
    Rpc {
        node: String,
        #[source]
        source: TransportError,
    },

    /// Broadcast failed because the signer account could not be loaded by the node.
    #[error("make sure that your account has enough balance")]
    InsufficientBalance,

    /// The chain accepted the transaction but executed it with a non-zero code.
    #[error("error code: '{code}' msg: '{raw_log}'")]
    TxFailed { code: u32, raw_log: String },

    /// Transaction response payload could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Transaction could not be encoded.
    #[error("encoding error: {0}")]
    Encode(String),

    /// Target block height was not reached in time.
    #[error("timeout exceeded waiting for block {target} after {waited:?} (last seen height {last_height})")]
    BlockTimeout {
        target: i64,
        last_height: i64,
        waited: Duration,
    },

    /// The caller cancelled the operation.
    #[error("operation cancelled")]
    Cancelled,
}

impl ClientError {
    /// True for every funding failure, whether the faucet or the wait failed.
    pub fn is_funding(&self) -> bool {
        matches!(self, ClientError::Funding(_))
    }

    /// True when a deadline elapsed (block wait or funding wait).
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            ClientError::BlockTimeout { .. } | ClientError::Funding(FundingError::Timeout { .. })
        )
    }

    /// True when the caller's cancellation token fired.
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            ClientError::Cancelled | ClientError::Funding(FundingError::Cancelled)
        )
    }

    /// True for errors that retrying cannot fix without changing configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidGasValue(_)
                | ClientError::InvalidCoins { .. }
                | ClientError::MissingHomeDir(_)
                | ClientError::Config(_)
                | ClientError::ConfigFile(_)
        )
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
