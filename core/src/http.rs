//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! crate builds `HttpRequest` values and parses `HttpResponse` values without
//! ever touching the network — the host (TUI, test harness) executes the
//! actual round-trip through the [`Transport`] trait. This keeps the core
//! deterministic: every list/form flow can be unit-tested against canned
//! responses.

use crate::error::ApiError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// An HTTP request described as plain data.
///
/// Built by the resource clients' `build_*` methods. A body is attached only
/// for non-GET requests, always JSON with the matching content-type header.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub(crate) fn bare(method: HttpMethod, path: String) -> Self {
        Self {
            method,
            path,
            headers: Vec::new(),
            body: None,
        }
    }

    pub(crate) fn json(method: HttpMethod, path: String, body: String) -> Self {
        Self {
            method,
            path,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        }
    }
}

/// An HTTP response described as plain data.
///
/// Constructed by the transport after executing an `HttpRequest`, then passed
/// to the resource clients' `parse_*` methods.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// The "ok" predicate: any 2xx-class status counts as success.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes HTTP round-trips on behalf of the core.
///
/// Implementations must map transport-level failures (connection refused,
/// DNS, timeout) to [`ApiError::Connection`] instead of panicking; server
/// error statuses are returned as ordinary responses for the parsers to
/// interpret.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_success_covers_the_2xx_class() {
        for status in [200, 201, 204, 299] {
            let response = HttpResponse {
                status,
                headers: Vec::new(),
                body: String::new(),
            };
            assert!(response.is_success(), "{status} should be success");
        }
        for status in [0, 199, 300, 404, 500] {
            let response = HttpResponse {
                status,
                headers: Vec::new(),
                body: String::new(),
            };
            assert!(!response.is_success(), "{status} should not be success");
        }
    }

    #[test]
    fn json_request_carries_content_type() {
        let req = HttpRequest::json(HttpMethod::Post, "/livros".to_string(), "{}".to_string());
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        assert_eq!(req.body.as_deref(), Some("{}"));
    }

    #[test]
    fn bare_request_has_no_body_or_headers() {
        let req = HttpRequest::bare(HttpMethod::Get, "/livros".to_string());
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }
}
