//! Typed decoding of successful transaction results.
//!
//! The `data` field of a committed transaction is a hex-encoded `TxMsgData`
//! envelope. Older chains fill the deprecated `data` list with
//! `(msg_type, payload)` pairs, where `msg_type` names the request message;
//! newer chains fill `msg_responses` with `Any` values naming the response
//! type directly. Only the first entry is decoded.

use prost::{Message, Name};
use prost_types::Any;
use std::ops::Deref;
use thiserror::Error;

use crate::chain::TxResponse;

/// Suffix turning a request message name into its response message name.
pub const LEGACY_RESPONSE_SUFFIX: &str = "Response";

/// Legacy per-message result.
#[derive(Clone, PartialEq, Message)]
pub struct MsgData {
    #[prost(string, tag = "1")]
    pub msg_type: String,
    #[prost(bytes = "vec", tag = "2")]
    pub data: Vec<u8>,
}

/// Envelope of message results returned by the chain.
#[derive(Clone, PartialEq, Message)]
pub struct TxMsgData {
    #[prost(message, repeated, tag = "1")]
    pub data: Vec<MsgData>,
    #[prost(message, repeated, tag = "2")]
    pub msg_responses: Vec<Any>,
}

/// Why a response payload could not be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("response data is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("malformed TxMsgData envelope: {0}")]
    MalformedEnvelope(#[source] prost::DecodeError),

    #[error("TxMsgData envelope carries no message results")]
    EmptyEnvelope,

    #[error("response type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("malformed {type_name} payload: {source}")]
    MalformedPayload {
        type_name: String,
        #[source]
        source: prost::DecodeError,
    },
}

/// Strip any `type.googleapis.com/` or leading `/` from a type URL.
pub fn type_name(type_url: &str) -> &str {
    match type_url.rfind('/') {
        Some(idx) => &type_url[idx + 1..],
        None => type_url,
    }
}

/// Unpack `value` as `T`, failing unless `type_url` names `T`.
pub fn unpack<T: Message + Name + Default>(type_url: &str, value: &[u8]) -> Result<T, DecodeError> {
    let expected = T::full_name();
    let actual = type_name(type_url);
    if actual != expected {
        return Err(DecodeError::TypeMismatch {
            expected,
            actual: actual.to_string(),
        });
    }
    T::decode(value).map_err(|source| DecodeError::MalformedPayload {
        type_name: expected,
        source,
    })
}

/// Result of a successfully broadcast transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    tx_response: TxResponse,
}

impl Response {
    pub fn new(tx_response: TxResponse) -> Self {
        Self { tx_response }
    }

    /// The underlying chain response.
    pub fn tx_response(&self) -> &TxResponse {
        &self.tx_response
    }

    pub fn into_inner(self) -> TxResponse {
        self.tx_response
    }

    /// Decode the result of the first message as `T`.
    ///
    /// `T` must be the response type of the Msg service method that was
    /// called, e.g. `MsgSendResponse` for `MsgSend`.
    pub fn decode<T: Message + Name + Default>(&self) -> Result<T, DecodeError> {
        let bytes = hex::decode(&self.tx_response.data)?;
        let envelope = TxMsgData::decode(bytes.as_slice()).map_err(DecodeError::MalformedEnvelope)?;

        if let Some(first) = envelope.data.first() {
            let type_url = format!("{}{}", first.msg_type, LEGACY_RESPONSE_SUFFIX);
            return unpack(&type_url, &first.data);
        }

        match envelope.msg_responses.first() {
            Some(first) => unpack(&first.type_url, &first.value),
            None => Err(DecodeError::EmptyEnvelope),
        }
    }
}

impl Deref for Response {
    type Target = TxResponse;

    fn deref(&self) -> &TxResponse {
        &self.tx_response
    }
}
