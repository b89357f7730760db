//! Coin amounts for fees and gas prices.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{ClientError, ClientResult};

/// An integer amount of one denomination.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: u128,
}

impl Coin {
    pub fn new(amount: u128, denom: impl Into<String>) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }
}

impl std::fmt::Display for Coin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// A decimal amount of one denomination (gas prices).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecCoin {
    pub denom: String,
    pub amount: Decimal,
}

impl std::fmt::Display for DecCoin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

fn invalid(value: &str, reason: impl Into<String>) -> ClientError {
    ClientError::InvalidCoins {
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Denominations: a letter followed by 2 to 127 of `[a-zA-Z0-9/:._-]`.
fn validate_denom(value: &str, denom: &str) -> ClientResult<()> {
    let mut chars = denom.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let rest_valid = chars.all(|c| c.is_ascii_alphanumeric() || "/:._-".contains(c));
    if starts_with_letter && rest_valid && (3..=128).contains(&denom.len()) {
        Ok(())
    } else {
        Err(invalid(value, format!("invalid denomination {:?}", denom)))
    }
}

fn split_amount(value: &str, allow_decimal: bool) -> ClientResult<(&str, &str)> {
    let value = value.trim();
    let split = value
        .find(|c: char| !(c.is_ascii_digit() || (allow_decimal && c == '.')))
        .unwrap_or(value.len());
    let (amount, denom) = value.split_at(split);
    if amount.is_empty() {
        return Err(invalid(value, "missing amount"));
    }
    validate_denom(value, denom.trim())?;
    Ok((amount, denom.trim()))
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Parse `"10uatom,5stake"` into coins sorted by denomination.
///
/// Zero amounts are dropped; duplicate denominations are rejected. An empty
/// string yields no coins.
pub fn parse_coins(value: &str) -> ClientResult<Vec<Coin>> {
    let mut coins = Vec::new();
    for part in split_list(value) {
        let (amount, denom) = split_amount(part, false)?;
        let amount = u128::from_str(amount).map_err(|e| invalid(part, e.to_string()))?;
        if amount > 0 {
            coins.push(Coin::new(amount, denom));
        }
    }
    coins.sort();
    if coins.windows(2).any(|w| w[0].denom == w[1].denom) {
        return Err(invalid(value, "duplicate denomination"));
    }
    Ok(coins)
}

/// Parse `"0.025uatom"` style decimal coins sorted by denomination.
pub fn parse_dec_coins(value: &str) -> ClientResult<Vec<DecCoin>> {
    let mut coins = Vec::new();
    for part in split_list(value) {
        let (amount, denom) = split_amount(part, true)?;
        let amount = Decimal::from_str(amount).map_err(|e| invalid(part, e.to_string()))?;
        if !amount.is_zero() {
            coins.push(DecCoin {
                denom: denom.to_string(),
                amount,
            });
        }
    }
    coins.sort_by(|a, b| a.denom.cmp(&b.denom));
    if coins.windows(2).any(|w| w[0].denom == w[1].denom) {
        return Err(invalid(value, "duplicate denomination"));
    }
    Ok(coins)
}

/// Fee owed for `gas` units at `prices`: `ceil(price * gas)` per denomination.
pub fn fees_from_gas_prices(prices: &[DecCoin], gas: u64) -> ClientResult<Vec<Coin>> {
    prices
        .iter()
        .map(|price| {
            let amount = price
                .amount
                .checked_mul(Decimal::from(gas))
                .and_then(|fee| fee.ceil().to_u128())
                .ok_or_else(|| invalid(&price.to_string(), "fee amount out of range"))?;
            Ok(Coin::new(amount, price.denom.clone()))
        })
        .collect()
}
