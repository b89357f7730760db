//! Bech32 address encoding.

use bech32::{FromBase32, ToBase32, Variant};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Maximum human-readable part length allowed by bech32.
const MAX_HRP_LEN: usize = 83;

/// Errors raised while deriving or decoding addresses.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// The account carries no public key to derive from.
    #[error("key material for account {0:?} is unavailable")]
    MissingKeyMaterial(String),

    /// An empty public key was passed to derivation.
    #[error("cannot derive an address from an empty public key")]
    EmptyPublicKey,

    /// Prefix is empty, too long, or not lowercase printable ASCII.
    #[error("invalid address prefix {0:?}")]
    InvalidPrefix(String),

    /// Bech32 encoding or decoding failed.
    #[error("invalid bech32 address {address:?}: {reason}")]
    Bech32 { address: String, reason: String },
}

/// Check that `prefix` can be used as a bech32 human-readable part.
pub fn validate_prefix(prefix: &str) -> Result<(), AddressError> {
    let valid = !prefix.is_empty()
        && prefix.len() <= MAX_HRP_LEN
        && prefix
            .bytes()
            .all(|b| (33..=126).contains(&b) && !b.is_ascii_uppercase());
    if valid {
        Ok(())
    } else {
        Err(AddressError::InvalidPrefix(prefix.to_string()))
    }
}

/// Derive the bech32 account address of `public_key` under `prefix`.
///
/// The address payload is `RIPEMD160(SHA256(public_key))`.
pub fn derive_address(prefix: &str, public_key: &[u8]) -> Result<String, AddressError> {
    if public_key.is_empty() {
        return Err(AddressError::EmptyPublicKey);
    }
    validate_prefix(prefix)?;

    let sha = Sha256::digest(public_key);
    let hash = Ripemd160::digest(sha);

    bech32::encode(prefix, hash.as_slice().to_base32(), Variant::Bech32).map_err(|e| {
        AddressError::Bech32 {
            address: prefix.to_string(),
            reason: e.to_string(),
        }
    })
}

/// Split a bech32 address into its prefix and raw payload bytes.
pub fn decode_address(address: &str) -> Result<(String, Vec<u8>), AddressError> {
    let bech32_err = |reason: String| AddressError::Bech32 {
        address: address.to_string(),
        reason,
    };

    let (hrp, data, variant) = bech32::decode(address).map_err(|e| bech32_err(e.to_string()))?;
    if variant != Variant::Bech32 {
        return Err(bech32_err("bech32m addresses are not account addresses".to_string()));
    }
    let bytes = Vec::<u8>::from_base32(&data).map_err(|e| bech32_err(e.to_string()))?;
    Ok((hrp, bytes))
}
