//! Liveness probe against `GET /status`.
//!
//! The probe result is logged by the shell, never surfaced as a user
//! notification, so unlike the resource endpoints it does not use the
//! response envelope — the body is the payload.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::ServerStatus;

pub fn build_status(base_url: &str) -> HttpRequest {
    HttpRequest::bare(
        HttpMethod::Get,
        format!("{}/status", base_url.trim_end_matches('/')),
    )
}

pub fn parse_status(response: HttpResponse) -> Result<ServerStatus, ApiError> {
    if !response.is_success() {
        return Err(ApiError::Server {
            status: response.status,
            message: format!("HTTP {}", response.status),
        });
    }
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_status_produces_correct_request() {
        let req = build_status("http://localhost:5000/api/");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:5000/api/status");
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_status_decodes_payload() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: r#"{"status":"online","mensagem":"API funcionando corretamente"}"#.to_string(),
        };
        let status = parse_status(response).unwrap();
        assert_eq!(status.status, "online");
    }

    #[test]
    fn parse_status_reports_non_2xx() {
        let response = HttpResponse {
            status: 503,
            headers: Vec::new(),
            body: String::new(),
        };
        let err = parse_status(response).unwrap_err();
        assert_eq!(err.status(), 503);
    }
}
