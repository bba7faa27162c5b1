//! Inbound request model.
//!
//! The transport hands the core an already-parsed request: method, raw target
//! (path plus optional query string), a header map, and the body bytes. This
//! module owns that value type and the query-string decoding that populates
//! `query_params`; route parameters are filled in later by the router during
//! dispatch.

use std::collections::HashMap;

use http::Method;
use tracing::debug;

/// A parsed inbound HTTP request as seen by the dispatch core.
///
/// The request is mutable during pipeline traversal: middleware mutate
/// `headers` and params in place and pass the same logical request forward to
/// the terminal handler.
///
/// Header keys are case-preserving and matched exactly; the last write for a
/// given key wins. HTTP-style case-insensitivity is a caller policy, not
/// something this core asserts.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// HTTP method (GET, POST, etc.)
    pub method: Method,
    /// Request path with any query string stripped
    pub path: String,
    /// Named path parameters, populated by the router at dispatch time
    pub route_params: HashMap<String, String>,
    /// Percent-decoded query string parameters
    pub query_params: HashMap<String, String>,
    /// HTTP headers (exact keys as provided, last write wins)
    pub headers: HashMap<String, String>,
    /// Raw body bytes
    pub body: Vec<u8>,
}

impl Request {
    /// Build a request from transport-parsed pieces.
    ///
    /// `target` is the raw request target; everything after the first `?` is
    /// parsed into `query_params` and stripped from `path`. Route parameters
    /// start empty.
    #[must_use]
    pub fn new(
        method: Method,
        target: &str,
        headers: HashMap<String, String>,
        body: Vec<u8>,
    ) -> Self {
        let path = target.split('?').next().unwrap_or(target).to_string();
        let query_params = parse_query_params(target);

        debug!(
            method = %method,
            path = %path,
            query_count = query_params.len(),
            header_count = headers.len(),
            body_bytes = body.len(),
            "Request constructed"
        );

        Self {
            method,
            path,
            route_params: HashMap::new(),
            query_params,
            headers,
            body,
        }
    }

    /// Get a route parameter by name.
    #[inline]
    #[must_use]
    pub fn route_param(&self, name: &str) -> Option<&str> {
        self.route_params.get(name).map(String::as_str)
    }

    /// Get a query parameter by name.
    #[inline]
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_params.get(name).map(String::as_str)
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

/// Parse query string parameters from a request target.
///
/// Extracts everything after the `?` character and percent-decodes parameter
/// names and values, including multi-byte UTF-8 sequences; `+` decodes to a
/// space. Duplicate keys keep the last value.
#[must_use]
pub fn parse_query_params(target: &str) -> HashMap<String, String> {
    if let Some(pos) = target.find('?') {
        let query_str = &target[pos + 1..];
        url::form_urlencoded::parse(query_str.as_bytes())
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    } else {
        HashMap::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_params() {
        let q = parse_query_params("/p?x=1&y=2");
        assert_eq!(q.get("x"), Some(&"1".to_string()));
        assert_eq!(q.get("y"), Some(&"2".to_string()));
    }

    #[test]
    fn test_parse_query_params_unicode() {
        let q = parse_query_params("/p?string=salam+%C9%99%C4%B1oue%C9%99i%C3%B6%C3%BC&number=123");
        assert_eq!(q.get("string"), Some(&"salam əıoueəiöü".to_string()));
        assert_eq!(q.get("number"), Some(&"123".to_string()));
    }

    #[test]
    fn test_target_split() {
        let req = Request::new(
            Method::GET,
            "/users?limit=10&offset=20",
            HashMap::new(),
            Vec::new(),
        );
        assert_eq!(req.path, "/users");
        assert_eq!(req.query_param("limit"), Some("10"));
        assert_eq!(req.query_param("offset"), Some("20"));
    }

    #[test]
    fn test_headers_exact_keys_last_write_wins() {
        let mut req = Request::new(Method::GET, "/", HashMap::new(), Vec::new());
        req.set_header("X-Tag", "one");
        req.set_header("X-Tag", "two");
        assert_eq!(req.header("X-Tag"), Some("two"));
        // keys are case-preserving, not case-folded
        assert_eq!(req.header("x-tag"), None);
    }
}
