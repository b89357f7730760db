//! Process-wide bech32 prefix configuration.
//!
//! Several clients in one process may target chains with different prefixes.
//! Anything that depends on "the current prefix" must hold an
//! [`AddressConfigGuard`] for the whole read-modify-derive sequence.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::address::codec::{derive_address, validate_prefix, AddressError};

/// Suffix appended to the account prefix to form the pubkey prefix.
pub const PUBKEY_PREFIX_SUFFIX: &str = "pub";

/// Prefix used before any client has configured one.
pub const DEFAULT_ACCOUNT_PREFIX: &str = "cosmos";

/// The account/pubkey prefix pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bech32Prefixes {
    /// Prefix for account addresses (e.g. `cosmos`).
    pub account: String,
    /// Prefix for account public keys (e.g. `cosmospub`).
    pub pubkey: String,
}

impl Bech32Prefixes {
    /// Build the pair for an account prefix.
    pub fn for_account(prefix: &str) -> Self {
        Self {
            account: prefix.to_string(),
            pubkey: format!("{}{}", prefix, PUBKEY_PREFIX_SUFFIX),
        }
    }
}

impl Default for Bech32Prefixes {
    fn default() -> Self {
        Self::for_account(DEFAULT_ACCOUNT_PREFIX)
    }
}

static BECH32_CONFIG: Mutex<Option<Bech32Prefixes>> = Mutex::new(None);

/// Entry point to the shared prefix configuration.
pub struct AddressConfig;

impl AddressConfig {
    /// Acquire the configuration lock and switch it to `prefix`.
    ///
    /// The returned guard keeps every other address-sensitive section out
    /// until it is dropped.
    pub fn lock(prefix: &str) -> AddressConfigGuard {
        let mut inner = BECH32_CONFIG
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let unchanged = matches!(inner.as_ref(), Some(current) if current.account == prefix);
        if !unchanged {
            tracing::trace!(prefix = %prefix, "Switching bech32 prefix");
            *inner = Some(Bech32Prefixes::for_account(prefix));
        }

        AddressConfigGuard { inner }
    }

    /// Set the prefix and release the lock immediately.
    pub fn set_prefix(prefix: &str) {
        drop(Self::lock(prefix));
    }
}

/// Exclusive access to the prefix configuration.
pub struct AddressConfigGuard {
    inner: MutexGuard<'static, Option<Bech32Prefixes>>,
}

impl AddressConfigGuard {
    /// The prefix pair in effect while this guard is held.
    pub fn prefixes(&self) -> Bech32Prefixes {
        self.inner.clone().unwrap_or_default()
    }

    /// Account address prefix in effect.
    pub fn account_prefix(&self) -> &str {
        self.inner
            .as_ref()
            .map(|p| p.account.as_str())
            .unwrap_or(DEFAULT_ACCOUNT_PREFIX)
    }

    /// Derive an address under the prefix in effect.
    pub fn derive_address(&self, public_key: &[u8]) -> Result<String, AddressError> {
        derive_address(self.account_prefix(), public_key)
    }

    /// Check that an address carries the prefix in effect.
    pub fn check_address(&self, address: &str) -> Result<(), AddressError> {
        validate_prefix(self.account_prefix())?;
        let (hrp, _) = crate::address::codec::decode_address(address)?;
        if hrp != self.account_prefix() {
            return Err(AddressError::Bech32 {
                address: address.to_string(),
                reason: format!("expected prefix {:?}, got {:?}", self.account_prefix(), hrp),
            });
        }
        Ok(())
    }
}
