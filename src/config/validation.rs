//! Configuration validation.
//!
//! Semantic checks on top of what serde already enforces. Returns every
//! problem found, not just the first.

use thiserror::Error;

use crate::address::codec::validate_prefix;
use crate::config::schema::ClientConfig;
use crate::tx::coins::{parse_coins, parse_dec_coins};
use crate::tx::gas::GasSetting;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a configuration.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (field, value) in [
        ("node_address", &config.node_address),
        ("api_address", &config.api_address),
        ("faucet.address", &config.faucet.address),
    ] {
        if let Err(e) = url::Url::parse(value) {
            errors.push(ValidationError::new(field, format!("invalid URL {:?}: {}", value, e)));
        }
    }

    if let Err(e) = validate_prefix(&config.address_prefix) {
        errors.push(ValidationError::new("address_prefix", e.to_string()));
    }

    if let Err(e) = GasSetting::parse(&config.gas) {
        errors.push(ValidationError::new("gas", e.to_string()));
    }

    if !(config.gas_adjustment.is_finite() && config.gas_adjustment > 0.0) {
        errors.push(ValidationError::new("gas_adjustment", "must be a positive number"));
    }

    if let Err(e) = parse_coins(&config.fees) {
        errors.push(ValidationError::new("fees", e.to_string()));
    }

    if let Err(e) = parse_dec_coins(&config.gas_prices) {
        errors.push(ValidationError::new("gas_prices", e.to_string()));
    }

    if config.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new("rpc_timeout_secs", "must be greater than zero"));
    }

    if config.wait.poll_interval_ms == 0 {
        errors.push(ValidationError::new("wait.poll_interval_ms", "must be greater than zero"));
    }

    if config.faucet.enabled {
        if config.faucet.denom.is_empty() {
            errors.push(ValidationError::new("faucet.denom", "must not be empty"));
        }
        if config.faucet.min_amount == 0 {
            errors.push(ValidationError::new("faucet.min_amount", "must be greater than zero"));
        }
        if config.faucet.ensure_timeout_secs == 0 {
            errors.push(ValidationError::new("faucet.ensure_timeout_secs", "must be greater than zero"));
        }
        if config.faucet.poll_interval_ms == 0 {
            errors.push(ValidationError::new("faucet.poll_interval_ms", "must be greater than zero"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
