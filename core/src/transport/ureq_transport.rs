//! Ureq-backed transport (blocking).
//!
//! ureq is synchronous, so each request runs on tokio's blocking pool. When
//! the caller cancels, the awaiting future is dropped immediately; the worker
//! thread finishes on its own within the request's `timeout_global`.

use ureq::typestate::{WithBody, WithoutBody};
use ureq::RequestBuilder;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;

type UreqResponse = ureq::http::Response<ureq::Body>;

/// A [`Transport`] backed by a [`ureq::Agent`].
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            // Status codes are classified from the envelope, not here.
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || run(&agent, request))
            .await
            .map_err(|e| TransportError::Other(Box::new(e)))?
    }
}

fn run(agent: &ureq::Agent, request: HttpRequest) -> Result<HttpResponse, TransportError> {
    let url = request.url.as_str();
    let body = request.body.as_deref().map(str::as_bytes);

    let result = match request.method {
        HttpMethod::Get => send_without_body(prepare(agent.get(url), &request), body),
        HttpMethod::Delete => send_without_body(prepare(agent.delete(url), &request), body),
        HttpMethod::Post => send_with_body(prepare(agent.post(url), &request), body),
        HttpMethod::Put => send_with_body(prepare(agent.put(url), &request), body),
        HttpMethod::Patch => send_with_body(prepare(agent.patch(url), &request), body),
    };

    let mut response = result.map_err(map_ureq_error)?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect();
    let body = response.body_mut().read_to_vec().map_err(|e| match e {
        ureq::Error::Timeout(_) => TransportError::Timeout,
        other => TransportError::Body(other.to_string()),
    })?;

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}

fn prepare<B>(mut builder: RequestBuilder<B>, request: &HttpRequest) -> RequestBuilder<B> {
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
        .config()
        .timeout_global(Some(request.timeout))
        .build()
}

fn send_without_body(
    builder: RequestBuilder<WithoutBody>,
    body: Option<&[u8]>,
) -> Result<UreqResponse, ureq::Error> {
    match body {
        Some(body) => builder.force_send_body().send(body),
        None => builder.call(),
    }
}

fn send_with_body(
    builder: RequestBuilder<WithBody>,
    body: Option<&[u8]>,
) -> Result<UreqResponse, ureq::Error> {
    match body {
        Some(body) => builder.send(body),
        None => builder.send_empty(),
    }
}

fn map_ureq_error(err: ureq::Error) -> TransportError {
    match err {
        ureq::Error::Timeout(_) => TransportError::Timeout,
        ureq::Error::HostNotFound => TransportError::Connection("host not found".to_owned()),
        ureq::Error::ConnectionFailed => TransportError::Connection("connection failed".to_owned()),
        ureq::Error::Io(e) => TransportError::Connection(e.to_string()),
        other => TransportError::Other(Box::new(other)),
    }
}
