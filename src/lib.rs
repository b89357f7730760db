//! Cosmos-SDK transaction lifecycle client.
//!
//! Resolves a signer from a keyring, optionally tops it up from a faucet,
//! builds an unsigned transaction (account number, sequence, gas, fees),
//! broadcasts it and decodes the typed result. Node access, key storage and
//! signing are supplied by the embedding application through traits.

// Foundations
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod observability;
pub mod resilience;

// Chain-facing subsystems
pub mod account;
pub mod address;
pub mod chain;
pub mod faucet;
pub mod tx;

pub mod client;

pub use client::{Client, ClientBuilder};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use lifecycle::{CancelToken, Cancellation};
pub use tx::{Response, TxService};
