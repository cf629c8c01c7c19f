//! The shared request pipeline.
//!
//! # Design
//! Every API operation goes through the same steps: build an `HttpRequest`
//! from (method, path, query, body), hand it to the transport under the
//! caller's deadline and cancellation token, parse the response body as an
//! [`Envelope`], and classify it by `error_code`. Building and parsing are
//! exposed separately (`build_request` / `parse_response`) and never touch
//! the network; `execute` wires them to a [`Transport`].
//!
//! `HostexClient` holds only immutable configuration and the transport
//! behind an `Arc`, so clones are cheap and concurrent calls need no locking.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, field, instrument, warn, Span};
use url::Url;

use crate::config::{ClientConfig, ACCESS_TOKEN_HEADER, USER_AGENT};
use crate::context::CallContext;
use crate::envelope::{parse_envelope, Envelope};
use crate::error::{HostexError, TransportError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::query::Query;
use crate::transport::{ReqwestTransport, Transport};

/// Client for the Hostex API.
pub struct HostexClient<T: Transport = ReqwestTransport> {
    inner: Arc<ClientInner<T>>,
}

struct ClientInner<T> {
    base_url: String,
    access_token: String,
    timeout: std::time::Duration,
    transport: T,
}

impl<T: Transport> Clone for HostexClient<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Transport> std::fmt::Debug for HostexClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostexClient")
            .field("base_url", &self.inner.base_url)
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

impl HostexClient<ReqwestTransport> {
    /// Create a client using the default reqwest transport.
    ///
    /// Fails with [`HostexError::Configuration`] if the access token is empty
    /// or the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, HostexError> {
        Self::with_transport(config, ReqwestTransport::new()?)
    }
}

impl<T: Transport> HostexClient<T> {
    /// Create a client that dispatches through `transport`.
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self, HostexError> {
        if config.access_token.is_empty() {
            return Err(HostexError::Configuration(
                "access token is required".to_string(),
            ));
        }
        Ok(Self {
            inner: Arc::new(ClientInner {
                base_url: config.resolved_base_url(),
                timeout: config.resolved_timeout(),
                access_token: config.access_token,
                transport,
            }),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn transport(&self) -> &T {
        &self.inner.transport
    }

    /// Build the request for one call without sending it.
    ///
    /// `path` is appended verbatim to the base URL; identifiers embedded in it
    /// must already be escaped. The query is form-encoded and omitted when
    /// empty. `Content-Type` is only set when there is a body.
    pub fn build_request<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        query: Option<&Query>,
        body: Option<&B>,
    ) -> Result<HttpRequest, HostexError> {
        let raw = format!("{}{}", self.inner.base_url, path);
        let mut url = Url::parse(&raw)
            .map_err(|e| HostexError::Configuration(format!("invalid request URL {raw:?}: {e}")))?;
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            url.query_pairs_mut().extend_pairs(query.iter());
        }

        let mut headers = vec![
            (ACCESS_TOKEN_HEADER.to_string(), self.inner.access_token.clone()),
            ("User-Agent".to_string(), USER_AGENT.to_string()),
        ];

        let body = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(HostexError::Serialization)?;
        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }

        Ok(HttpRequest {
            method,
            url: url.into(),
            headers,
            body,
            timeout: self.inner.timeout,
        })
    }

    /// Parse and classify a response. The transport status is not consulted.
    pub fn parse_response(&self, response: &HttpResponse) -> Result<Envelope, HostexError> {
        parse_envelope(&response.body)
    }

    /// Run one call through the pipeline and return the envelope.
    ///
    /// On `error_code != 200` the envelope is returned inside
    /// [`HostexError::Api`].
    #[instrument(
        name = "hostex_request",
        skip(self, ctx, query, body),
        fields(
            http.method = %method,
            http.path = path,
            http.status_code = field::Empty,
            hostex.request_id = field::Empty,
            hostex.error_code = field::Empty,
        )
    )]
    pub async fn execute<B: Serialize + ?Sized>(
        &self,
        ctx: &CallContext,
        method: HttpMethod,
        path: &str,
        query: Option<&Query>,
        body: Option<&B>,
    ) -> Result<Envelope, HostexError> {
        let mut request = self.build_request(method, path, query, body)?;
        let timeout = ctx.remaining().unwrap_or(self.inner.timeout);
        request.timeout = timeout;

        if ctx.is_cancelled() {
            return Err(TransportError::Cancelled.into());
        }
        if timeout.is_zero() {
            return Err(TransportError::Timeout.into());
        }

        debug!(url = %request.url, ?timeout, "dispatching request");
        let send = tokio::time::timeout(timeout, self.inner.transport.send(request));
        let outcome = match ctx.cancellation() {
            Some(token) => tokio::select! {
                biased;
                () = token.cancelled() => return Err(TransportError::Cancelled.into()),
                outcome = send => outcome,
            },
            None => send.await,
        };
        let response = outcome.map_err(|_| TransportError::Timeout)??;

        let span = Span::current();
        span.record("http.status_code", response.status);

        match self.parse_response(&response) {
            Ok(envelope) => {
                span.record("hostex.request_id", envelope.request_id.as_str());
                span.record("hostex.error_code", envelope.error_code);
                debug!("request succeeded");
                Ok(envelope)
            }
            Err(err) => {
                if let HostexError::Api {
                    code,
                    ref message,
                    ref envelope,
                } = err
                {
                    span.record("hostex.request_id", envelope.request_id.as_str());
                    span.record("hostex.error_code", code);
                    warn!(code, error_msg = message.as_str(), "API returned an error");
                } else {
                    warn!(error = %err, "response could not be decoded");
                }
                Err(err)
            }
        }
    }

    /// Run one call and decode the payload into `R`.
    pub async fn request<R, B>(
        &self,
        ctx: &CallContext,
        method: HttpMethod,
        path: &str,
        query: Option<&Query>,
        body: Option<&B>,
    ) -> Result<R, HostexError>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(ctx, method, path, query, body)
            .await?
            .decode_data()
    }

    /// Run one call whose payload carries nothing the caller needs.
    pub async fn request_empty<B: Serialize + ?Sized>(
        &self,
        ctx: &CallContext,
        method: HttpMethod,
        path: &str,
        query: Option<&Query>,
        body: Option<&B>,
    ) -> Result<(), HostexError> {
        self.execute(ctx, method, path, query, body).await?;
        Ok(())
    }
}
