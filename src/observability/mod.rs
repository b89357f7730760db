//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Faucet, gas, broadcast and block-wait code paths produce:
//!     → tracing events (structured fields: address, denom, height, code)
//!     → metrics.rs (outcome counters)
//!
//! Binaries opt in:
//!     → logging.rs (fmt subscriber + EnvFilter)
//! ```

pub mod logging;
pub mod metrics;
