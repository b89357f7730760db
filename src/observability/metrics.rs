//! Client metrics.
//!
//! # Metrics
//! - `cosmos_client_broadcasts_total` (counter): broadcasts by outcome
//! - `cosmos_client_faucet_requests_total` (counter): faucet calls by outcome
//! - `cosmos_client_gas_simulations_total` (counter): simulations by outcome
//! - `cosmos_client_block_waits_total` (counter): block waits by outcome
//!
//! Without an installed recorder every call is a no-op.

/// Record the outcome of a broadcast (`ok`, `tx_failed`, `transport_error`).
pub fn record_broadcast(outcome: &'static str) {
    metrics::counter!("cosmos_client_broadcasts_total", "outcome" => outcome).increment(1);
}

/// Record the outcome of a faucet request (`ok`, `rejected`, `unreachable`).
pub fn record_faucet_request(outcome: &'static str) {
    metrics::counter!("cosmos_client_faucet_requests_total", "outcome" => outcome).increment(1);
}

/// Record the outcome of a gas simulation (`ok`, `error`).
pub fn record_gas_simulation(outcome: &'static str) {
    metrics::counter!("cosmos_client_gas_simulations_total", "outcome" => outcome).increment(1);
}

/// Record the outcome of a block wait (`reached`, `timeout`, `cancelled`, `error`).
pub fn record_block_wait(outcome: &'static str) {
    metrics::counter!("cosmos_client_block_waits_total", "outcome" => outcome).increment(1);
}
