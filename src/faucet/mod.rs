//! Faucet auto-funding subsystem.
//!
//! # State Machine
//! ```text
//! CHECK_BALANCE → (balance ≥ min) DONE
//! CHECK_BALANCE → (balance < min) REQUEST_FUNDS → POLL_BALANCE → DONE | TIMEOUT
//! ```
//!
//! # Data Flow
//! ```text
//! signer address
//!     → balance.rs (BalanceQuery: amount of one denom)
//!     → client.rs (FaucetClient: transfer request)
//!     → funder.rs (state machine, polled with resilience::poll)
//! ```
//!
//! # Design Decisions
//! - Only runs when enabled and not in generate-only mode
//! - Faucet failures are terminal; only the balance poll is retried
//! - The poll loop is bounded by a deadline (40 seconds by default)

pub mod balance;
pub mod client;
pub mod funder;
pub mod types;

pub use balance::{BalanceQuery, RestBalanceQuery};
pub use client::{FaucetClient, HttpFaucetClient};
pub use funder::{FaucetFunder, FundingState};
pub use types::{FaucetInfo, FundingError, TransferRequest, TransferResponse};
