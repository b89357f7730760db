//! Account lookup by name or address.

use std::sync::Arc;

use crate::account::keyring::{Account, Keyring, KeyringError};
use crate::address::AddressConfig;
use crate::error::{ClientError, ClientResult};

/// Resolves accounts from the keyring under the client's address prefix.
#[derive(Clone)]
pub struct AccountResolver {
    keyring: Arc<dyn Keyring>,
    address_prefix: String,
}

impl AccountResolver {
    pub fn new(keyring: Arc<dyn Keyring>, address_prefix: impl Into<String>) -> Self {
        Self {
            keyring,
            address_prefix: address_prefix.into(),
        }
    }

    /// Find the account named `name_or_address`, or else the one at that address.
    pub fn resolve(&self, name_or_address: &str) -> ClientResult<Account> {
        let _guard = AddressConfig::lock(&self.address_prefix);

        if let Ok(account) = self.keyring.get_by_name(name_or_address) {
            return Ok(account);
        }

        match self.keyring.get_by_address(name_or_address) {
            Ok(account) => Ok(account),
            Err(KeyringError::NotFound(_)) => {
                Err(ClientError::AccountNotFound(name_or_address.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Address of the account named `account_name` under the client's prefix.
    pub fn address(&self, account_name: &str) -> ClientResult<String> {
        let account = self.keyring.get_by_name(account_name)?;
        Ok(account.address(&self.address_prefix)?)
    }

    pub fn address_prefix(&self) -> &str {
        &self.address_prefix
    }
}

impl std::fmt::Debug for AccountResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountResolver")
            .field("address_prefix", &self.address_prefix)
            .finish()
    }
}
