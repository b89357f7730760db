//! Pending transaction handle: sign, broadcast, interpret.

use std::sync::Arc;

use crate::account::{Account, Keyring};
use crate::chain::{BroadcastMode, Transport, TransportError, TxResponse};
use crate::error::{ClientError, ClientResult};
use crate::observability::metrics;
use crate::tx::factory::{TxFactory, UnsignedTx};
use crate::tx::response::Response;

/// Node error text seen when the signer account cannot be loaded, which in
/// practice means it was never funded.
const ACCOUNT_LOOKUP_FAILURE: &str = "not found";

/// A built transaction waiting to be signed and broadcast.
pub struct TxService {
    transport: Arc<dyn Transport>,
    keyring: Arc<dyn Keyring>,
    node_address: String,
    broadcast_mode: BroadcastMode,
    signer: Account,
    factory: TxFactory,
    tx: UnsignedTx,
}

impl TxService {
    pub(crate) fn new(
        transport: Arc<dyn Transport>,
        keyring: Arc<dyn Keyring>,
        node_address: String,
        broadcast_mode: BroadcastMode,
        signer: Account,
        factory: TxFactory,
        tx: UnsignedTx,
    ) -> Self {
        Self {
            transport,
            keyring,
            node_address,
            broadcast_mode,
            signer,
            factory,
            tx,
        }
    }

    /// Gas limit the transaction was built with.
    pub fn gas(&self) -> u64 {
        self.factory.gas()
    }

    pub fn factory(&self) -> &TxFactory {
        &self.factory
    }

    pub fn unsigned_tx(&self) -> &UnsignedTx {
        &self.tx
    }

    pub fn signer(&self) -> &Account {
        &self.signer
    }

    /// JSON rendering of the unsigned transaction, for generate-only flows.
    pub fn encode_json(&self) -> ClientResult<String> {
        serde_json::to_string_pretty(&self.tx).map_err(|e| ClientError::Encode(e.to_string()))
    }

    /// Sign through the keyring and submit.
    ///
    /// A zero response code returns the raw [`Response`] for decoding; any
    /// other code fails with [`ClientError::TxFailed`].
    pub async fn broadcast(self) -> ClientResult<Response> {
        let tx_bytes = self.keyring.sign(&self.signer.name, &self.factory, &self.tx)?;

        tracing::debug!(
            signer = %self.signer.name,
            mode = %self.broadcast_mode,
            sequence = self.factory.sequence(),
            "Broadcasting transaction"
        );

        let result = self.transport.broadcast_tx(&tx_bytes, self.broadcast_mode).await;
        let tx_response = handle_broadcast_result(result, &self.node_address)?;

        tracing::info!(
            txhash = %tx_response.txhash,
            height = tx_response.height,
            gas_used = tx_response.gas_used,
            "Transaction broadcast"
        );
        Ok(Response::new(tx_response))
    }
}

impl std::fmt::Debug for TxService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TxService")
            .field("signer", &self.signer.name)
            .field("broadcast_mode", &self.broadcast_mode)
            .field("factory", &self.factory)
            .field("tx", &self.tx)
            .finish()
    }
}

/// Map a broadcast outcome to the caller-facing result.
pub fn handle_broadcast_result(
    result: Result<TxResponse, TransportError>,
    node_address: &str,
) -> ClientResult<TxResponse> {
    let resp = match result {
        Ok(resp) => resp,
        Err(e) if e.message().contains(ACCOUNT_LOOKUP_FAILURE) => {
            metrics::record_broadcast("transport_error");
            tracing::warn!(error = %e, "Broadcast failed to load signer account");
            return Err(ClientError::InsufficientBalance);
        }
        Err(source) => {
            metrics::record_broadcast("transport_error");
            return Err(ClientError::Rpc {
                node: node_address.to_string(),
                source,
            });
        }
    };

    if resp.code > 0 {
        metrics::record_broadcast("tx_failed");
        tracing::warn!(code = resp.code, raw_log = %resp.raw_log, txhash = %resp.txhash, "Transaction failed");
        return Err(ClientError::TxFailed {
            code: resp.code,
            raw_log: resp.raw_log,
        });
    }

    metrics::record_broadcast("ok");
    Ok(resp)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NODE: &str = "http://localhost:26657";

    #[test]
    fn test_code_zero_is_success() {
        let resp = TxResponse {
            txhash: "ABC".to_string(),
            ..TxResponse::default()
        };
        let out = handle_broadcast_result(Ok(resp), NODE).unwrap();
        assert_eq!(out.txhash, "ABC");
    }

    #[test]
    fn test_nonzero_code_is_error() {
        let resp = TxResponse {
            code: 5,
            raw_log: "insufficient funds".to_string(),
            ..TxResponse::default()
        };
        let err = handle_broadcast_result(Ok(resp), NODE).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains('5'));
        assert!(msg.contains("insufficient funds"));
    }

    #[test]
    fn test_account_lookup_failure_translated() {
        let err = handle_broadcast_result(
            Err(TransportError::new("rpc error: account cosmos1xyz not found")),
            NODE,
        )
        .unwrap_err();
        assert!(matches!(err, ClientError::InsufficientBalance));
        assert!(err.to_string().contains("enough balance"));
    }

    #[test]
    fn test_other_transport_error_wrapped_with_node() {
        let err = handle_broadcast_result(Err(TransportError::new("connection refused")), NODE).unwrap_err();
        assert_eq!(
            err.to_string(),
            "error while requesting node 'http://localhost:26657': connection refused"
        );
    }
}
