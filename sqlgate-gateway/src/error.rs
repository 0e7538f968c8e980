//! Error types for the gateway crate.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use sqlgate_core::CoreError;
use sqlgate_engine::EngineError;

/// Errors that can occur during gateway request handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// The engine failed during prepare, bind, or execution.
    #[error("failed to run query: {0}")]
    Engine(#[from] EngineError),

    /// The request body does not satisfy the route's schema.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The bearer credential is missing, malformed, or wrong.
    ///
    /// One generic message for all three; the response must not say which.
    #[error("unauthorized")]
    Unauthorized,

    /// A dispatcher inconsistency not otherwise classified. The detail is
    /// logged, never surfaced.
    #[error("internal error")]
    Internal(String),
}

impl From<CoreError> for GatewayError {
    fn from(err: CoreError) -> Self {
        GatewayError::InvalidRequest(err.to_string())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            GatewayError::Engine(_) | GatewayError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::Unauthorized => StatusCode::UNAUTHORIZED,
        };

        match &self {
            GatewayError::Engine(e) => tracing::error!(error = %e, "query dispatch failed"),
            GatewayError::Internal(detail) => {
                tracing::error!(detail = %detail, "unclassified dispatcher failure");
            }
            _ => {}
        }

        (status, Json(json!({"error": self.to_string()}))).into_response()
    }
}
