//! Error types for the biblioteca API client.
//!
//! # Design
//! Connectivity failures get a dedicated variant with a fixed user-facing
//! message and status 0, mirroring the envelope the backend's own errors
//! arrive in: callers always see "a status plus a displayable message",
//! whether the request died on the wire or the server refused it. Server
//! refusals carry the `erro` string verbatim.

use thiserror::Error;

/// Fixed message shown when the backend cannot be reached at all.
pub const CONNECTION_ERROR_MESSAGE: &str =
    "Erro ao conectar com o servidor. Verifique se a API está rodando";

/// Errors returned by the resource clients and controllers.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The transport could not complete the request (network unreachable,
    /// connection refused). Reported with status 0.
    #[error("{CONNECTION_ERROR_MESSAGE}")]
    Connection,

    /// The server answered with a non-2xx status; `message` is the `erro`
    /// field of the response body, verbatim.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("resposta inválida do servidor: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("falha ao serializar requisição: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Status code associated with the failure; 0 when no HTTP exchange
    /// completed.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Server { status, .. } => *status,
            _ => 0,
        }
    }
}
