//! Keyring seam and the account value it hands out.

use thiserror::Error;

use crate::address::{derive_address, AddressError};
use crate::tx::{TxFactory, UnsignedTx};

/// Errors raised by keyring backends.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyringError {
    /// No key under that name or address.
    #[error("key {0:?} not found")]
    NotFound(String),

    /// Backend failure (locked keystore, I/O, ...).
    #[error("keyring backend error: {0}")]
    Backend(String),

    /// Signing was refused or failed.
    #[error("signing failed: {0}")]
    Signing(String),
}

/// A named key known to the keyring.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    /// Key name in the keyring.
    pub name: String,
    /// Compressed public key bytes. Empty when the backend cannot expose it.
    pub public_key: Vec<u8>,
}

impl Account {
    pub fn new(name: impl Into<String>, public_key: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            public_key,
        }
    }

    /// Bech32 address of this account under `prefix`.
    pub fn address(&self, prefix: &str) -> Result<String, AddressError> {
        derive_address(prefix, &self.public_key).map_err(|e| match e {
            AddressError::EmptyPublicKey => AddressError::MissingKeyMaterial(self.name.clone()),
            other => other,
        })
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("name", &self.name)
            .field("public_key", &hex::encode(&self.public_key))
            .finish()
    }
}

/// Key storage and signing backend.
///
/// Lookups by address are interpreted under the process-wide prefix, so
/// callers hold an [`crate::address::AddressConfigGuard`] around them.
pub trait Keyring: Send + Sync {
    /// Look up a key by name.
    fn get_by_name(&self, name: &str) -> Result<Account, KeyringError>;

    /// Look up a key by bech32 address.
    fn get_by_address(&self, address: &str) -> Result<Account, KeyringError>;

    /// Sign `tx` with the key `name` using the factory's chain id, account
    /// number, sequence and sign mode. Returns the encoded signed transaction.
    fn sign(&self, name: &str, factory: &TxFactory, tx: &UnsignedTx) -> Result<Vec<u8>, KeyringError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_requires_key_material() {
        let account = Account::new("alice", Vec::new());
        let err = account.address("cosmos").unwrap_err();
        assert_eq!(err, AddressError::MissingKeyMaterial("alice".to_string()));
    }

    #[test]
    fn test_address_depends_on_prefix() {
        let account = Account::new("alice", vec![3u8; 33]);
        assert!(account.address("cosmos").unwrap().starts_with("cosmos1"));
        assert!(account.address("juno").unwrap().starts_with("juno1"));
    }
}
