//! Assemble an unsigned transaction for an account.

use prost_types::Any;
use std::sync::Arc;

use crate::account::Account;
use crate::address::AddressConfig;
use crate::chain::AccountRetriever;
use crate::error::{ClientError, ClientResult};
use crate::faucet::FaucetFunder;
use crate::lifecycle::CancelToken;
use crate::tx::coins::{Coin, DecCoin};
use crate::tx::factory::{TxFactory, UnsignedTx};
use crate::tx::gas::{resolve_gas, GasSetting, Gasometer};

/// Output of [`TransactionBuilder::build`].
#[derive(Debug, Clone)]
pub struct BuiltTx {
    /// Fully resolved factory the transaction must be signed with.
    pub factory: TxFactory,
    /// The unsigned transaction.
    pub tx: UnsignedTx,
}

/// Resolves signer, account metadata, gas and fees into an unsigned transaction.
#[derive(Clone)]
pub struct TransactionBuilder {
    address_prefix: String,
    node_address: String,
    gas: String,
    fees: Vec<Coin>,
    gas_prices: Vec<DecCoin>,
    fee_granter: Option<String>,
    accounts: Arc<dyn AccountRetriever>,
    gasometer: Arc<dyn Gasometer>,
    funder: Option<FaucetFunder>,
}

impl TransactionBuilder {
    pub fn new(
        address_prefix: impl Into<String>,
        node_address: impl Into<String>,
        accounts: Arc<dyn AccountRetriever>,
        gasometer: Arc<dyn Gasometer>,
    ) -> Self {
        Self {
            address_prefix: address_prefix.into(),
            node_address: node_address.into(),
            gas: String::new(),
            fees: Vec::new(),
            gas_prices: Vec::new(),
            fee_granter: None,
            accounts,
            gasometer,
            funder: None,
        }
    }

    /// Gas setting: an unsigned integer or `auto`. Parsed on every build.
    pub fn with_gas(mut self, gas: impl Into<String>) -> Self {
        self.gas = gas.into();
        self
    }

    pub fn with_fees(mut self, fees: Vec<Coin>) -> Self {
        self.fees = fees;
        self
    }

    pub fn with_gas_prices(mut self, gas_prices: Vec<DecCoin>) -> Self {
        self.gas_prices = gas_prices;
        self
    }

    pub fn with_fee_granter(mut self, fee_granter: Option<String>) -> Self {
        self.fee_granter = fee_granter;
        self
    }

    /// Fund signers from the faucet before building. `None` disables funding.
    pub fn with_funder(mut self, funder: Option<FaucetFunder>) -> Self {
        self.funder = funder;
        self
    }

    /// Build an unsigned transaction of `msgs` signed by `account`.
    ///
    /// `base` supplies chain id, gas adjustment, memo and any pre-set account
    /// number or sequence; it is never modified.
    pub async fn build(
        &self,
        base: &TxFactory,
        account: &Account,
        msgs: Vec<Any>,
        cancel: &CancelToken,
    ) -> ClientResult<BuiltTx> {
        let address = {
            let guard = AddressConfig::lock(&self.address_prefix);
            account.address(guard.account_prefix())?
        };

        if let Some(funder) = &self.funder {
            funder.ensure_funds(&address, cancel).await?;
        }

        let factory = base.clone().with_from(account.name.clone(), address.clone());
        let factory = self.prepare_factory(factory, &address).await?;

        let setting = GasSetting::parse(&self.gas)?;
        let gas = resolve_gas(setting, self.gasometer.as_ref(), &factory, &msgs).await?;

        let factory = factory
            .with_gas(gas)
            .with_fees(self.fees.clone())
            .with_gas_prices(self.gas_prices.clone());

        let mut tx = factory.build_unsigned_tx(msgs)?;
        tx.set_fee_granter(self.fee_granter.clone());

        tracing::debug!(
            signer = %account.name,
            address = %address,
            gas,
            account_number = factory.account_number(),
            sequence = factory.sequence(),
            "Transaction built"
        );

        Ok(BuiltTx { factory, tx })
    }

    /// Check the account exists and fill in whichever of account number and
    /// sequence are still zero.
    pub async fn prepare_factory(&self, factory: TxFactory, address: &str) -> ClientResult<TxFactory> {
        self.accounts
            .ensure_exists(address)
            .await
            .map_err(|source| ClientError::AccountNotOnChain {
                address: address.to_string(),
                source,
            })?;

        let (init_num, init_seq) = (factory.account_number(), factory.sequence());
        if init_num != 0 && init_seq != 0 {
            return Ok(factory);
        }

        let (num, seq) = self
            .accounts
            .account_number_sequence(address)
            .await
            .map_err(|source| ClientError::Rpc {
                node: self.node_address.clone(),
                source,
            })?;

        let mut factory = factory;
        if init_num == 0 {
            factory = factory.with_account_number(num);
        }
        if init_seq == 0 {
            factory = factory.with_sequence(seq);
        }
        Ok(factory)
    }
}

impl std::fmt::Debug for TransactionBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionBuilder")
            .field("address_prefix", &self.address_prefix)
            .field("gas", &self.gas)
            .field("fees", &self.fees)
            .field("gas_prices", &self.gas_prices)
            .field("fee_granter", &self.fee_granter)
            .field("faucet", &self.funder)
            .finish()
    }
}
