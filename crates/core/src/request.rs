//! Generation request types
//!
//! Common request shape for the hosted generative model, built up in the
//! adapters and handed to a [`crate::GenerativeModel`] backend.

use serde::{Deserialize, Serialize};

/// A single generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Optional system instruction sent alongside the prompt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<String>,
    /// User prompt text
    pub prompt: String,
    /// Optional inline binary part (document images)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
    /// Expected response shape
    #[serde(default)]
    pub response_format: ResponseFormat,
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Output token cap
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

impl GenerateRequest {
    /// Create a plain-text request
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            system_instruction: None,
            prompt: prompt.into(),
            inline_data: None,
            response_format: ResponseFormat::Text,
            temperature: None,
            max_output_tokens: None,
        }
    }

    /// Set the system instruction
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Attach an inline binary part
    pub fn with_inline_data(mut self, data: InlineData) -> Self {
        self.inline_data = Some(data);
        self
    }

    /// Request a JSON-structured reply
    pub fn expecting_json(mut self) -> Self {
        self.response_format = ResponseFormat::Json;
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature.clamp(0.0, 2.0));
        self
    }
}

/// Inline binary payload, base64-encoded for the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineData {
    /// MIME type of the payload
    pub mime_type: String,
    /// Base64-encoded bytes
    pub data: String,
}

impl InlineData {
    /// Encode raw bytes for inline transmission
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        use base64::Engine;
        Self {
            mime_type: mime_type.into(),
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }
}

/// Expected response shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Free prose
    #[default]
    Text,
    /// A single JSON object
    Json,
}
