//! Endpoint response types

use bytes::Bytes;

use crate::protocol::response::ExecutionResult;

/// Results for one endpoint call, in request order
#[derive(Debug, Clone, PartialEq)]
pub struct BatchResponse {
    /// One result per request
    pub results: Vec<ExecutionResult>,

    /// Whether the results answer a batch array
    pub is_batch: bool,
}

impl BatchResponse {
    /// Create a response
    pub fn new(results: Vec<ExecutionResult>, is_batch: bool) -> Self {
        Self { results, is_batch }
    }

    /// Extract the lone result of a non-batch call
    pub fn into_single(self) -> Option<ExecutionResult> {
        if self.is_batch || self.results.len() != 1 {
            return None;
        }
        self.results.into_iter().next()
    }
}

/// Serialized endpoint output handed back to the transport
#[derive(Debug, Clone)]
pub struct EndpointResponse {
    /// Status code (HTTP semantics)
    pub status: u16,

    /// MIME type of the body
    pub content_type: String,

    /// Response body as bytes
    pub body: Bytes,
}

impl EndpointResponse {
    /// A 200 response
    pub fn ok(body: Bytes, content_type: impl Into<String>) -> Self {
        Self {
            status: 200,
            content_type: content_type.into(),
            body,
        }
    }

    /// A 400 response
    pub fn bad_request(body: Bytes, content_type: impl Into<String>) -> Self {
        Self {
            status: 400,
            content_type: content_type.into(),
            body,
        }
    }

    /// Check if the response indicates success (2xx status code)
    pub fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}
