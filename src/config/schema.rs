//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files. Every
//! field has a default so a minimal file (or none at all) is valid.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::chain::BroadcastMode;

/// Root configuration for the client.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Node RPC address.
    pub node_address: String,

    /// Node REST (API) address, used for balance queries.
    pub api_address: String,

    /// Bech32 account address prefix.
    pub address_prefix: String,

    /// Data directory. Defaults to `$HOME/.<chain-id>`.
    pub home: Option<PathBuf>,

    /// Keyring directory. Defaults to `home`.
    pub keyring_dir: Option<PathBuf>,

    /// Keyring backend name (`test`, `os`, `file`, ...).
    pub keyring_backend: String,

    /// Service name used by OS keyring backends.
    pub keyring_service_name: String,

    /// Gas limit: an unsigned integer, or `auto` (empty means `auto`).
    pub gas: String,

    /// Multiplier applied to simulated gas.
    pub gas_adjustment: f64,

    /// Price per unit of gas (e.g. `0.025uatom`).
    pub gas_prices: String,

    /// Flat fee (e.g. `10uatom`). Takes precedence over `gas_prices`.
    pub fees: String,

    /// Transaction memo.
    pub memo: String,

    /// Address paying the fees on the signer's behalf.
    pub fee_granter: Option<String>,

    /// Broadcast mode.
    pub broadcast_mode: BroadcastMode,

    /// Build transactions without submitting them.
    pub generate_only: bool,

    /// Account number to sign with. 0 means fetch from chain.
    pub account_number: u64,

    /// Sequence to sign with. 0 means fetch from chain.
    pub sequence: u64,

    /// Timeout for HTTP calls to the faucet and REST endpoint.
    pub rpc_timeout_secs: u64,

    /// Faucet settings.
    pub faucet: FaucetConfig,

    /// Block wait settings.
    pub wait: WaitConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            node_address: "http://localhost:26657".to_string(),
            api_address: "http://localhost:1317".to_string(),
            address_prefix: "cosmos".to_string(),
            home: None,
            keyring_dir: None,
            keyring_backend: "test".to_string(),
            keyring_service_name: "cosmos".to_string(),
            gas: "300000".to_string(),
            gas_adjustment: 1.0,
            gas_prices: String::new(),
            fees: String::new(),
            memo: String::new(),
            fee_granter: None,
            broadcast_mode: BroadcastMode::Block,
            generate_only: false,
            account_number: 0,
            sequence: 0,
            rpc_timeout_secs: 10,
            faucet: FaucetConfig::default(),
            wait: WaitConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Faucet auto-funding configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FaucetConfig {
    /// Fund the signer from the faucet before creating transactions.
    pub enabled: bool,

    /// Faucet service address.
    pub address: String,

    /// Denomination whose balance is checked.
    pub denom: String,

    /// Minimum balance the signer must hold.
    pub min_amount: u64,

    /// How long to wait for faucet funds to land, in seconds.
    pub ensure_timeout_secs: u64,

    /// Interval between balance checks, in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for FaucetConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            address: "http://localhost:4500".to_string(),
            denom: "token".to_string(),
            min_amount: 100,
            ensure_timeout_secs: 40,
            poll_interval_ms: 1000,
        }
    }
}

/// Block height wait configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WaitConfig {
    /// Timeout used by `wait_for_next_block`, in seconds.
    pub next_block_timeout_secs: u64,

    /// Interval between status reads, in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            next_block_timeout_secs: 10,
            poll_interval_ms: 1000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
