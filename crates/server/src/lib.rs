//! Pharma Assistant Server
//!
//! HTTP endpoints for the three feature orchestrators, the history
//! sidebar, and the active locale.

pub mod http;
pub mod metrics;
pub mod state;

pub use http::create_router;
pub use metrics::{init_metrics, record_provider_error, record_request};
pub use state::AppState;

use axum::http::StatusCode;
use thiserror::Error;

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Upstream provider failed: {0}")]
    Provider(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ServerError> for StatusCode {
    fn from(err: ServerError) -> Self {
        match err {
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::Provider(_) => StatusCode::BAD_GATEWAY,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<pharma_assist_core::Error> for ServerError {
    fn from(err: pharma_assist_core::Error) -> Self {
        use pharma_assist_core::Error;
        match err {
            Error::Validation(msg) => ServerError::Validation(msg),
            Error::Provider(msg) => ServerError::Provider(msg),
            other => ServerError::Internal(other.to_string()),
        }
    }
}
