//! Error types for the gateway crate.

use axum::{
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use ide_boot::{AuthError, ConfigLoadError};
use serde_json::json;

use crate::render::RenderError;

/// Errors that can occur during gateway request handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// The caller could not be authenticated. Terminal: the message is
    /// written straight to the response.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The client configuration profile could not be loaded or run.
    #[error("configuration error: {0}")]
    ConfigLoad(#[from] ConfigLoadError),

    /// The bootstrap page could not be rendered.
    #[error("render error: {0}")]
    Render(#[from] RenderError),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match self {
            GatewayError::Auth(e) => {
                tracing::error!(error = %e, "authentication failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    [(CONTENT_TYPE, "text/plain; charset=utf-8")],
                    e.to_string(),
                )
                    .into_response()
            }
            other => {
                tracing::error!(error = %other, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": other.to_string()})),
                )
                    .into_response()
            }
        }
    }
}
