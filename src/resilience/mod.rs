//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Faucet funding (wait for balance), block height wait:
//!     → poll.rs (probe, then tick / deadline / cancellation)
//! ```
//!
//! # Design Decisions
//! - Every loop has an explicit deadline; nothing retries indefinitely
//! - Fixed interval, no jitter: probes are cheap reads against one node
//! - Cancellation wins over the deadline, the deadline wins over the tick
//! - Network calls outside a polling loop are never retried

pub mod poll;

pub use poll::{poll_until, Attempt, PollError, PollPolicy};
