//! Mock implementations for testing.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::domain::{ApiRequest, AppError, RawResponse, SlothTransport, TransportError};

/// Scripted outcome for one call to the mock transport
#[derive(Debug)]
pub enum MockReply {
    Response(RawResponse),
    Timeout,
    ConnectionRefused,
}

/// Transport that records every request and replays scripted replies in order.
///
/// When the script runs out it answers `500 Internal Server Error` so a test
/// that forgot to script a reply fails on an assertion rather than a panic.
#[derive(Debug, Default)]
pub struct MockSlothTransport {
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockSlothTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the canonical reason phrase for `status`
    pub fn push_json(&self, status: StatusCode, body: &str) {
        self.push(MockReply::Response(RawResponse {
            status,
            reason: status.canonical_reason().map(str::to_string),
            body: body.as_bytes().to_vec(),
        }));
    }

    pub fn push_json_value(&self, status: StatusCode, body: &serde_json::Value) {
        self.push_json(status, &body.to_string());
    }

    pub fn push(&self, reply: MockReply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    /// All requests seen so far, oldest first
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl SlothTransport for MockSlothTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, AppError> {
        self.requests.lock().unwrap().push(request);

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(MockReply::Response(response)) => Ok(response),
            Some(MockReply::Timeout) => Err(AppError::Transport(TransportError::Timeout(
                "mock timeout".to_string(),
            ))),
            Some(MockReply::ConnectionRefused) => Err(AppError::Transport(
                TransportError::Connect("mock connection refused".to_string()),
            )),
            None => Ok(RawResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                reason: Some("Internal Server Error".to_string()),
                body: b"no reply scripted".to_vec(),
            }),
        }
    }
}
