//! Transaction parameters and the unsigned transaction they produce.

use prost_types::Any;
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use crate::error::ClientResult;
use crate::tx::coins::{fees_from_gas_prices, Coin, DecCoin};

/// Default gas limit when no gas setting is resolved.
pub const DEFAULT_GAS_LIMIT: u64 = 300_000;

/// Default multiplier applied to simulated gas.
pub const DEFAULT_GAS_ADJUSTMENT: f64 = 1.0;

/// Signature scheme requested from the keyring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignMode {
    /// Let the keyring pick its default.
    #[default]
    Unspecified,
    Direct,
    LegacyAminoJson,
}

/// Parameters a transaction is built and signed with.
///
/// Every `with_*` call returns a new factory; resolution steps derive a new
/// value from a base factory instead of mutating a shared one. Zero account
/// number and sequence mean "not resolved yet".
#[derive(Debug, Clone, PartialEq)]
pub struct TxFactory {
    chain_id: String,
    gas: u64,
    gas_adjustment: f64,
    fees: Vec<Coin>,
    gas_prices: Vec<DecCoin>,
    account_number: u64,
    sequence: u64,
    sign_mode: SignMode,
    memo: String,
    from_name: String,
    from_address: String,
}

impl TxFactory {
    pub fn new(chain_id: impl Into<String>) -> Self {
        Self {
            chain_id: chain_id.into(),
            gas: DEFAULT_GAS_LIMIT,
            gas_adjustment: DEFAULT_GAS_ADJUSTMENT,
            fees: Vec::new(),
            gas_prices: Vec::new(),
            account_number: 0,
            sequence: 0,
            sign_mode: SignMode::Unspecified,
            memo: String::new(),
            from_name: String::new(),
            from_address: String::new(),
        }
    }

    pub fn with_chain_id(mut self, chain_id: impl Into<String>) -> Self {
        self.chain_id = chain_id.into();
        self
    }

    pub fn with_gas(mut self, gas: u64) -> Self {
        self.gas = gas;
        self
    }

    pub fn with_gas_adjustment(mut self, gas_adjustment: f64) -> Self {
        self.gas_adjustment = gas_adjustment;
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

    pub fn with_account_number(mut self, account_number: u64) -> Self {
        self.account_number = account_number;
        self
    }

    pub fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn with_sign_mode(mut self, sign_mode: SignMode) -> Self {
        self.sign_mode = sign_mode;
        self
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    /// Bind the factory to the signing key.
    pub fn with_from(mut self, name: impl Into<String>, address: impl Into<String>) -> Self {
        self.from_name = name.into();
        self.from_address = address.into();
        self
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    pub fn gas(&self) -> u64 {
        self.gas
    }

    pub fn gas_adjustment(&self) -> f64 {
        self.gas_adjustment
    }

    pub fn fees(&self) -> &[Coin] {
        &self.fees
    }

    pub fn gas_prices(&self) -> &[DecCoin] {
        &self.gas_prices
    }

    pub fn account_number(&self) -> u64 {
        self.account_number
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn sign_mode(&self) -> SignMode {
        self.sign_mode
    }

    pub fn memo(&self) -> &str {
        &self.memo
    }

    pub fn from_name(&self) -> &str {
        &self.from_name
    }

    pub fn from_address(&self) -> &str {
        &self.from_address
    }

    /// Fee to attach: the flat fee when set, otherwise derived from gas prices.
    pub fn resolve_fee(&self) -> ClientResult<Vec<Coin>> {
        if !self.fees.is_empty() {
            return Ok(self.fees.clone());
        }
        if !self.gas_prices.is_empty() {
            return fees_from_gas_prices(&self.gas_prices, self.gas);
        }
        Ok(Vec::new())
    }

    /// Assemble an unsigned transaction carrying `messages` in order.
    pub fn build_unsigned_tx(&self, messages: Vec<Any>) -> ClientResult<UnsignedTx> {
        Ok(UnsignedTx {
            messages,
            memo: self.memo.clone(),
            fee: Fee {
                amount: self.resolve_fee()?,
                gas_limit: self.gas,
                granter: None,
            },
        })
    }
}

/// Fee section of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fee {
    pub amount: Vec<Coin>,
    pub gas_limit: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub granter: Option<String>,
}

/// A transaction ready to be handed to the keyring for signing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnsignedTx {
    #[serde(serialize_with = "serialize_messages")]
    pub messages: Vec<Any>,
    pub memo: String,
    pub fee: Fee,
}

impl UnsignedTx {
    /// Let `granter` pay the fee. An empty address clears it.
    pub fn set_fee_granter(&mut self, granter: Option<String>) {
        self.fee.granter = granter.filter(|g| !g.is_empty());
    }
}

#[derive(Serialize)]
struct JsonAny<'a> {
    #[serde(rename = "@type")]
    type_url: &'a str,
    value: String,
}

fn serialize_messages<S: Serializer>(messages: &[Any], serializer: S) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(messages.len()))?;
    for msg in messages {
        seq.serialize_element(&JsonAny {
            type_url: &msg.type_url,
            value: hex::encode(&msg.value),
        })?;
    }
    seq.end()
}
