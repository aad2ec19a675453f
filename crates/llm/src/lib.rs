//! Gemini integration
//!
//! Provides:
//! - `GeminiBackend` - REST client for the hosted generative model
//! - Prompt templates for the assistant's features
//! - `MedicationQueries` - the three AI query adapters
//! - `LlmTranslator` - translation through the same model

pub mod backend;
pub mod prompt;
pub mod queries;
pub mod translate;

pub use backend::{GeminiBackend, LlmConfig};
pub use queries::MedicationQueries;
pub use translate::LlmTranslator;

use thiserror::Error;

/// LLM errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        LlmError::Network(err.to_string())
    }
}

impl From<LlmError> for pharma_assist_core::Error {
    fn from(err: LlmError) -> Self {
        pharma_assist_core::Error::Provider(err.to_string())
    }
}
