//! Seams to the node.
//!
//! Production implementations wrap a Tendermint/CometBFT RPC client and the
//! auth module queries; they live in the embedding application.

use async_trait::async_trait;

use crate::chain::types::{BroadcastMode, NodeStatus, SimulateResponse, TransportError, TxResponse};
use crate::tx::UnsignedTx;

/// Node RPC operations used by the transaction lifecycle.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Current node status (chain id, latest height).
    async fn status(&self) -> Result<NodeStatus, TransportError>;

    /// Simulate an unsigned transaction to estimate its gas.
    async fn simulate(&self, tx: &UnsignedTx) -> Result<SimulateResponse, TransportError>;

    /// Submit signed transaction bytes.
    async fn broadcast_tx(
        &self,
        tx_bytes: &[u8],
        mode: BroadcastMode,
    ) -> Result<TxResponse, TransportError>;

    /// Fetch a committed transaction by hash.
    async fn tx(&self, hash: &[u8]) -> Result<TxResponse, TransportError>;
}

/// On-chain account metadata lookups.
#[async_trait]
pub trait AccountRetriever: Send + Sync {
    /// Fail unless the account exists on chain.
    async fn ensure_exists(&self, address: &str) -> Result<(), TransportError>;

    /// Fetch `(account_number, sequence)` for the account.
    async fn account_number_sequence(&self, address: &str) -> Result<(u64, u64), TransportError>;
}
