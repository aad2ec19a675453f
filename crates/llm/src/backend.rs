//! Gemini REST backend
//!
//! Talks to the `generateContent` endpoint directly. One HTTP call per
//! generation request, no retries; the client timeout is the only timeout
//! this layer enforces.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use pharma_assist_core::{GenerateRequest, GenerativeModel, ResponseFormat, Result};

use crate::LlmError;

/// Backend configuration
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// REST endpoint base (`.../v1beta/models`)
    pub endpoint: String,
    /// API key
    pub api_key: String,
    /// Model name/ID
    pub model: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
            model: "gemini-2.5-flash".to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Gemini backend
#[derive(Clone)]
pub struct GeminiBackend {
    client: Client,
    config: LlmConfig,
}

impl GeminiBackend {
    /// Create a new backend
    pub fn new(config: LlmConfig) -> std::result::Result<Self, LlmError> {
        if config.api_key.is_empty() {
            return Err(LlmError::Configuration("API key is not set".to_string()));
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                LlmError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    /// Build the API URL
    fn api_url(&self) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            self.config.endpoint, self.config.model, self.config.api_key
        )
    }

    /// Execute a single request
    async fn execute(
        &self,
        request: &GenerateContentRequest,
    ) -> std::result::Result<GenerateContentResponse, LlmError> {
        let response = self
            .client
            .post(self.api_url())
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(map_http_error(status, body));
        }

        response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl GenerativeModel for GeminiBackend {
    async fn generate(&self, request: GenerateRequest) -> Result<String> {
        let wire = GenerateContentRequest::from_request(&request);
        let response = self.execute(&wire).await?;

        let text = extract_text(response).ok_or_else(|| {
            LlmError::InvalidResponse("no text in the response candidates".to_string())
        })?;
        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

// Gemini API wire types

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    fn from_request(request: &GenerateRequest) -> Self {
        let mut parts = vec![Part::Text {
            text: request.prompt.clone(),
        }];
        if let Some(inline) = &request.inline_data {
            parts.push(Part::InlineData {
                inline_data: InlineDataPayload {
                    mime_type: inline.mime_type.clone(),
                    data: inline.data.clone(),
                },
            });
        }

        let system_instruction = request.system_instruction.as_ref().map(|text| Content {
            role: "system".to_string(),
            parts: vec![Part::Text { text: text.clone() }],
        });

        let response_mime_type = match request.response_format {
            ResponseFormat::Json => Some("application/json".to_string()),
            ResponseFormat::Text => None,
        };
        let generation_config =
            if response_mime_type.is_some() || request.temperature.is_some() {
                Some(GenerationConfig {
                    temperature: request.temperature,
                    max_output_tokens: request.max_output_tokens,
                    response_mime_type,
                })
            } else {
                None
            };

        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts,
            }],
            system_instruction,
            generation_config,
        }
    }
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineDataPayload,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineDataPayload {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn extract_text(response: GenerateContentResponse) -> Option<String> {
    response
        .candidates
        .and_then(|mut candidates| candidates.pop())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
}

fn map_http_error(status: StatusCode, body: String) -> LlmError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or(body);

    LlmError::Api {
        status: status.as_u16(),
        message,
    }
}
