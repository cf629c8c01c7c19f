//! Error types for the Hostex API client.
//!
//! # Design
//! Each variant maps to one place the pipeline can fail, so callers can pick
//! a retry policy per kind: configuration problems are fatal, transport
//! failures may be retried for idempotent calls, decode failures mean the API
//! contract drifted, and `Api` carries whatever the service reported. The
//! pipeline itself never retries.

use thiserror::Error;

use crate::envelope::Envelope;

/// Errors returned by [`HostexClient`](crate::HostexClient).
#[derive(Debug, Error)]
pub enum HostexError {
    /// The client was set up incorrectly (empty credential, unusable URL).
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The request never produced a complete response.
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// The response body was not a valid envelope, or the payload did not
    /// match the requested shape.
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request body or query parameters could not be encoded.
    #[error("failed to encode request: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The envelope reported a status other than 200.
    ///
    /// The full envelope is kept so the request id remains available for
    /// support tickets.
    #[error("API error {code}: {message}")]
    Api {
        code: i64,
        message: String,
        envelope: Box<Envelope>,
    },
}

impl HostexError {
    /// The envelope behind an `Api` error.
    pub fn envelope(&self) -> Option<&Envelope> {
        match self {
            HostexError::Api { envelope, .. } => Some(envelope),
            _ => None,
        }
    }

    /// The server-assigned request id, when the server answered at all.
    pub fn request_id(&self) -> Option<&str> {
        self.envelope().map(|envelope| envelope.request_id.as_str())
    }
}

/// Failures below the application layer: the network, the clock, or the
/// caller's cancellation.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("request cancelled")]
    Cancelled,

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}
