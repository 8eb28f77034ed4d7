use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::ErrorEnvelope;

/// Errors that can occur while generating recipes or looking up videos
#[derive(Error, Debug)]
pub enum ChefError {
    /// Caller sent a malformed request body
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A server-held credential is missing
    #[error("Server configuration error: {0}")]
    Configuration(String),

    /// A third-party API failed or answered with an unusable payload
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// The proxy could not be reached at all
    #[error("Network error: {0}")]
    Network(String),

    /// The proxy answered with a `{success: false}` envelope
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// Client-side storage could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl ChefError {
    /// Wrap a transport-level failure (timeout, refused connection, bad body)
    /// of an outbound call made while performing `action`.
    pub fn transport(action: &str, err: reqwest::Error) -> Self {
        ChefError::Upstream {
            status: 500,
            message: format!("Internal server error while {}: {}", action, err),
        }
    }

    /// HTTP status this error maps to at the proxy boundary
    pub fn status(&self) -> StatusCode {
        match self {
            ChefError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ChefError::Upstream { status, .. } | ChefError::Rejected { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ChefError::Network(_) => StatusCode::BAD_GATEWAY,
            ChefError::Configuration(_) | ChefError::Storage(_) | ChefError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<std::io::Error> for ChefError {
    fn from(err: std::io::Error) -> Self {
        ChefError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ChefError {
    fn from(err: serde_json::Error) -> Self {
        ChefError::Storage(err.to_string())
    }
}

impl IntoResponse for ChefError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("Request failed: {} - {}", status, self);
        } else {
            log::warn!("Request rejected: {} - {}", status, self);
        }

        let body = ErrorEnvelope::new(self.to_string());
        (status, Json(body)).into_response()
    }
}
