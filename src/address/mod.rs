//! Address derivation subsystem.
//!
//! # Data Flow
//! ```text
//! Account public key
//!     → codec.rs (SHA-256 → RIPEMD-160 → bech32 with prefix)
//!     → config.rs (process-wide prefix pair, held under one lock)
//!     → account / tx subsystems (signer address)
//! ```
//!
//! # Design Decisions
//! - Derivation itself is a pure function of (prefix, key)
//! - The process-wide prefix pair is only touched through a lock guard, so a
//!   reader never sees the account prefix of one chain with the pubkey prefix
//!   of another
//! - The guard is never held across an `.await`

pub mod codec;
pub mod config;

pub use codec::{decode_address, derive_address, AddressError};
pub use config::{AddressConfig, AddressConfigGuard, Bech32Prefixes};
