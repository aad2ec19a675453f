//! Error types shared across the workspace
//!
//! Two error kinds matter to callers: `Validation` (a local precondition
//! failed, nothing was sent over the network) and `Provider` (an external
//! call failed and was normalized to a user-facing message). The remaining
//! variants cover the ambient infrastructure.

use thiserror::Error;

/// Workspace-wide result alias
pub type Result<T> = std::result::Result<T, Error>;

/// Workspace-wide error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Local precondition failure. Never reaches the network.
    #[error("{0}")]
    Validation(String),

    /// Normalized failure from an external provider call.
    #[error("{0}")]
    Provider(String),

    /// Audio encoding/decoding failure.
    #[error("Audio error: {0}")]
    Audio(String),

    /// History persistence failure.
    #[error("History error: {0}")]
    History(String),

    /// Configuration failure.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a provider error
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider(message.into())
    }

    /// True if this error is a local validation failure
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// The generic user-facing message for a failed provider action.
    ///
    /// The original failure is logged at the adapter; callers only ever see
    /// this normalized form.
    pub fn provider_failure(action: &str) -> Self {
        Self::Provider(format!(
            "An unexpected error occurred while {action}. Please try again later."
        ))
    }
}
