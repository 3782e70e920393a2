//! Interpretation of the backend's response envelope.
//!
//! Success bodies look like `{"sucesso": true, "dados": ..., "mensagem":
//! "..."}`, failures like `{"sucesso": false, "erro": "..."}`. The status
//! code decides which shape applies (the 2xx "ok" predicate); the shapes
//! themselves are assumed, not validated — a missing `erro` falls back to a
//! generic `HTTP <status>` text rather than a hard failure.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ApiError;
use crate::http::HttpResponse;

/// A decoded success response: the `dados` payload plus the optional
/// server-provided `mensagem` shown in notifications.
#[derive(Debug, Clone)]
pub struct ApiSuccess<T> {
    pub data: T,
    pub message: Option<String>,
}

#[derive(Deserialize)]
struct DataEnvelope<T> {
    dados: T,
    mensagem: Option<String>,
}

#[derive(Deserialize)]
struct AckEnvelope {
    mensagem: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    erro: Option<String>,
}

/// Decode a response that carries a `dados` payload.
pub(crate) fn parse_data<T: DeserializeOwned>(
    response: HttpResponse,
) -> Result<ApiSuccess<T>, ApiError> {
    check(&response)?;
    let envelope: DataEnvelope<T> = serde_json::from_str(&response.body)
        .map_err(|e| ApiError::Deserialization(e.to_string()))?;
    Ok(ApiSuccess {
        data: envelope.dados,
        message: envelope.mensagem,
    })
}

/// Decode a response that carries only a confirmation `mensagem` (deletes).
pub(crate) fn parse_ack(response: HttpResponse) -> Result<ApiSuccess<()>, ApiError> {
    check(&response)?;
    let envelope: AckEnvelope = serde_json::from_str(&response.body)
        .map_err(|e| ApiError::Deserialization(e.to_string()))?;
    Ok(ApiSuccess {
        data: (),
        message: envelope.mensagem,
    })
}

/// Gate on the status code; non-2xx becomes `ApiError::Server` with the
/// body's `erro` string.
fn check(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let message = serde_json::from_str::<ErrorEnvelope>(&response.body)
        .ok()
        .and_then(|e| e.erro)
        .unwrap_or_else(|| format!("HTTP {}", response.status));
    Err(ApiError::Server {
        status: response.status,
        message,
    })
}
