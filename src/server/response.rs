//! Outbound response model and construction helpers.

use std::collections::HashMap;

use http::StatusCode;
use serde::Serialize;

/// An HTTP response produced by a handler, a middleware short-circuit, or the
/// error-handling strategy.
///
/// The body is always a byte sequence; string bodies are a UTF-8 encoding
/// convenience layered on top. Header keys follow the same policy as
/// [`Request`](crate::server::Request): exact keys, last write wins.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers (exact keys, last write wins)
    pub headers: HashMap<String, String>,
    /// Raw body bytes
    pub body: Vec<u8>,
}

impl Response {
    /// An empty response with the given status: no headers, no body.
    #[must_use]
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// A UTF-8 text response with `Content-Type: text/plain`.
    #[must_use]
    pub fn text(status: StatusCode, body: impl Into<String>) -> Self {
        let mut resp = Self::new(status);
        resp.set_header("Content-Type", "text/plain");
        resp.body = body.into().into_bytes();
        resp
    }

    /// A `200 OK` text response.
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self::text(StatusCode::OK, body)
    }

    /// A JSON response with `Content-Type: application/json`.
    ///
    /// Serialization failure surfaces as an application error for the
    /// dispatch boundary to wrap.
    pub fn json<T: Serialize>(status: StatusCode, body: &T) -> anyhow::Result<Self> {
        let mut resp = Self::new(status);
        resp.set_header("Content-Type", "application/json");
        resp.body = serde_json::to_vec(body)?;
        Ok(resp)
    }

    /// Get a header by exact key.
    #[inline]
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Add or replace a header (last write wins).
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }
}
