//! Typed client for the Hostex property-management API (v3).
//!
//! # Overview
//! Every endpoint answers with the same JSON envelope
//! (`request_id`, `error_code`, `error_msg`, `data`). One request pipeline
//! builds the request, injects the access token, dispatches it through a
//! pluggable [`Transport`], classifies the envelope and re-decodes `data`
//! into the type each operation declares.
//!
//! # Design
//! - `HostexClient` holds immutable configuration and a transport behind an
//!   `Arc`; it is cheap to clone and safe to share across tasks.
//! - Request building (`build_request`) and response classification
//!   (`parse_response`) never touch the network, so both are tested as
//!   plain data.
//! - Each call takes a [`CallContext`] carrying an optional deadline and
//!   cancellation token; both are enforced around the transport future.
//! - No retries, no caching. Errors say which layer failed and callers
//!   decide what to do.
//!
//! ```rust,ignore
//! use hostex_core::{CallContext, ClientConfig, HostexClient, ListPropertiesParams};
//!
//! let client = HostexClient::new(ClientConfig::from_env()?)?;
//! let page = client
//!     .list_properties(&CallContext::default(), &ListPropertiesParams::default())
//!     .await?;
//! ```

pub mod client;
pub mod config;
pub mod context;
pub mod envelope;
pub mod error;
pub mod http;
pub mod query;
pub mod resources;
pub mod transport;
pub mod types;

#[cfg(test)]
mod test_support;

pub use client::HostexClient;
pub use config::{ClientConfig, ACCESS_TOKEN_HEADER, DEFAULT_BASE_URL, USER_AGENT};
pub use context::CallContext;
pub use envelope::{decode_into, parse_envelope, Envelope};
pub use error::{HostexError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use query::Query;
pub use resources::*;
pub use tokio_util::sync::CancellationToken;
pub use transport::{ReqwestTransport, Transport, UreqTransport};
pub use types::*;
