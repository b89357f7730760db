//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Caller (CLI Ctrl-C handler, embedding service shutdown):
//!     Cancellation::cancel()
//!     → CancelToken observed by resilience::poll loops
//!     → faucet funding / block waits return Cancelled
//! ```
//!
//! # Design Decisions
//! - Cancellation is sticky: a token created after the trigger sees it
//! - Cancellation is distinct from deadline expiry so callers can decide to retry

pub mod cancel;

pub use cancel::{CancelToken, Cancellation};
