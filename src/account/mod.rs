//! Account subsystem.
//!
//! # Data Flow
//! ```text
//! name or address
//!     → resolver.rs (under the address config lock)
//!     → keyring.rs (Keyring collaborator: lookup, signing)
//!     → Account (name + public key; address derived per prefix)
//! ```
//!
//! # Security Constraints
//! - The client never reads private key bytes; signing happens in the keyring
//! - Accounts are looked up per operation and never cached

pub mod keyring;
pub mod resolver;

pub use keyring::{Account, Keyring, KeyringError};
pub use resolver::AccountResolver;
