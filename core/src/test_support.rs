//! In-process transports for unit tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{json, Value};

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;

/// Answers every request with a canned response and keeps what it was sent.
/// With no response configured it fails like a refused connection.
#[derive(Clone)]
pub(crate) struct RecordingTransport {
    response: Option<HttpResponse>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl RecordingTransport {
    pub(crate) fn responding(response: HttpResponse) -> Self {
        Self {
            response: Some(response),
            requests: Arc::default(),
        }
    }

    /// A success envelope carrying `data`.
    pub(crate) fn ok(data: Value) -> Self {
        let body = json!({
            "request_id": "test-request",
            "error_code": 200,
            "error_msg": "",
            "data": data,
        });
        Self::responding(HttpResponse::new(200, body.to_string()))
    }

    pub(crate) fn failing() -> Self {
        Self {
            response: None,
            requests: Arc::default(),
        }
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn last(&self) -> HttpRequest {
        self.requests().pop().expect("no request was sent")
    }
}

impl Transport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.response
            .clone()
            .ok_or_else(|| TransportError::Connection("connection refused".to_string()))
    }
}

/// Takes `delay` to answer, for exercising deadlines and cancellation.
pub(crate) struct SlowTransport {
    delay: Duration,
}

impl SlowTransport {
    pub(crate) fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Transport for SlowTransport {
    async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
        tokio::time::sleep(self.delay).await;
        Ok(HttpResponse::new(
            200,
            r#"{"request_id":"slow","error_code":200,"error_msg":"","data":null}"#,
        ))
    }
}
