//! Pluggable HTTP executors.
//!
//! The pipeline hands a fully built [`HttpRequest`] to a [`Transport`] and
//! gets back the status, headers and fully read body. Transports do not
//! interpret status codes; classification belongs to the envelope.

mod reqwest_transport;
mod ureq_transport;

use std::future::Future;

pub use reqwest_transport::ReqwestTransport;
pub use ureq_transport::UreqTransport;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes one HTTP round trip.
///
/// Implementations must honour [`HttpRequest::timeout`] and read the whole
/// body before returning. Dropping the returned future abandons the request.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}
