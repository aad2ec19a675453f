//! Gemini speech synthesis backend
//!
//! Requests the AUDIO response modality with a fixed prebuilt voice. The
//! reply carries base64 PCM (sometimes wrapped in a data URI); it is
//! decoded, wrapped in a WAV container, and re-encoded as a
//! `data:audio/wav;base64,...` URI for playback.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use pharma_assist_core::{Error, Result, SpeechPayload, SpeechSynthesizer};

use crate::wav::{strip_data_uri, wav_data_uri};
use crate::SpeechError;

/// TTS backend configuration
#[derive(Debug, Clone)]
pub struct TtsConfig {
    /// REST endpoint base (`.../v1beta/models`)
    pub endpoint: String,
    /// API key
    pub api_key: String,
    /// Speech model name/ID
    pub model: String,
    /// Fixed prebuilt voice
    pub voice: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
            model: "gemini-2.5-flash-preview-tts".to_string(),
            voice: "Algenib".to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Gemini TTS backend
#[derive(Clone)]
pub struct GeminiSpeech {
    client: Client,
    config: TtsConfig,
}

impl GeminiSpeech {
    /// Create a new backend
    pub fn new(config: TtsConfig) -> std::result::Result<Self, SpeechError> {
        if config.api_key.is_empty() {
            return Err(SpeechError::Configuration(
                "API key is not set".to_string(),
            ));
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                SpeechError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    fn api_url(&self) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            self.config.endpoint, self.config.model, self.config.api_key
        )
    }

    async fn request_audio(&self, text: &str) -> std::result::Result<String, SpeechError> {
        let request = SpeechRequest::new(text, &self.config.voice);

        let response = self
            .client
            .post(self.api_url())
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(SpeechError::Api { status, message });
        }

        let parsed: SpeechResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::InvalidAudio(e.to_string()))?;

        let inline = parsed.into_inline_data().ok_or(SpeechError::NoAudio)?;

        // Some transports hand the payload back as a data URI; strip the
        // prefix either way before decoding.
        let payload = match strip_data_uri(&inline.data) {
            Some((_mime, payload)) => payload,
            None => inline.data.as_str(),
        };

        let pcm = BASE64_STANDARD
            .decode(payload)
            .map_err(|e| SpeechError::InvalidAudio(format!("base64 decode failed: {e}")))?;

        wav_data_uri(&pcm)
    }
}

#[async_trait]
impl SpeechSynthesizer for GeminiSpeech {
    async fn synthesize(&self, text: &str) -> Result<SpeechPayload> {
        if text.trim().is_empty() {
            return Err(Error::validation("Text to narrate cannot be empty."));
        }

        match self.request_audio(text).await {
            Ok(audio_data_uri) => Ok(SpeechPayload { audio_data_uri }),
            Err(e) => {
                tracing::error!(voice = %self.config.voice, error = %e, "Speech synthesis failed");
                Err(Error::provider_failure("generating the narration"))
            }
        }
    }

    fn voice_name(&self) -> &str {
        &self.config.voice
    }
}

// TTS wire types

#[derive(Debug, Serialize)]
struct SpeechRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

impl SpeechRequest {
    fn new(text: &str, voice: &str) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: text.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["AUDIO".to_string()],
                speech_config: SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: voice.to_string(),
                        },
                    },
                },
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<String>,
    speech_config: SpeechConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechConfig {
    voice_config: VoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceConfig {
    prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PrebuiltVoiceConfig {
    voice_name: String,
}

#[derive(Debug, Deserialize)]
struct SpeechResponse {
    candidates: Option<Vec<Candidate>>,
}

impl SpeechResponse {
    fn into_inline_data(self) -> Option<InlineData> {
        self.candidates?
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .find_map(|part| part.inline_data)
    }
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
#[serde(rename_all = "camelCase")]
struct PartResponse {
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[allow(dead_code)]
    mime_type: Option<String>,
    data: String,
}
