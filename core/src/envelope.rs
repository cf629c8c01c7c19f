//! The uniform response wrapper and the second-pass payload decode.
//!
//! # Design
//! Every endpoint answers with the same outer shape; only `data` varies.
//! Responses are therefore decoded twice: once into [`Envelope`] with `data`
//! left as a dynamic [`Value`], then `data` alone into whatever type the
//! calling operation declares. One pipeline serves every endpoint without
//! per-endpoint parsing code.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::HostexError;

/// `error_code` value the API uses for success.
pub const SUCCESS_CODE: i64 = 200;

/// Outer wrapper of every API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub request_id: String,
    pub error_code: i64,
    #[serde(default)]
    pub error_msg: String,
    #[serde(default)]
    pub data: Value,
}

impl Envelope {
    pub fn is_success(&self) -> bool {
        self.error_code == SUCCESS_CODE
    }

    /// Decode the payload into the caller's shape.
    pub fn decode_data<T: DeserializeOwned>(&self) -> Result<T, HostexError> {
        decode_into(&self.data)
    }
}

/// Parse a raw response body and classify it.
///
/// Application success is decided by `error_code` alone. A 200 transport
/// status carrying `error_code: 401` is still an error, and a 500 carrying
/// `error_code: 200` is not.
pub fn parse_envelope(body: &[u8]) -> Result<Envelope, HostexError> {
    let envelope: Envelope = serde_json::from_slice(body).map_err(HostexError::Decode)?;
    if !envelope.is_success() {
        return Err(HostexError::Api {
            code: envelope.error_code,
            message: envelope.error_msg.clone(),
            envelope: Box::new(envelope),
        });
    }
    Ok(envelope)
}

/// Re-decode an opaque payload into a concrete type.
///
/// Fields of `payload` that `T` does not declare are ignored, so decoding the
/// result of a previous decode yields the same value.
pub fn decode_into<T: DeserializeOwned>(payload: &Value) -> Result<T, HostexError> {
    T::deserialize(payload).map_err(HostexError::Decode)
}
