//! Speech synthesis and recognition
//!
//! Provides:
//! - `GeminiSpeech` - hosted TTS, re-encoding raw PCM into a WAV data URI
//! - WAV container helpers (mono, 24 kHz, 16-bit)
//! - `NoopRecognizer` - the injected stand-in when no dictation capability
//!   is present

pub mod recognize;
pub mod tts;
pub mod wav;

pub use recognize::NoopRecognizer;
pub use tts::{GeminiSpeech, TtsConfig};
pub use wav::{pcm_to_wav, strip_data_uri, wav_data_uri};

use thiserror::Error;

/// Speech errors
#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("No audio payload in the response")]
    NoAudio,

    #[error("Invalid audio payload: {0}")]
    InvalidAudio(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for SpeechError {
    fn from(err: reqwest::Error) -> Self {
        SpeechError::Network(err.to_string())
    }
}

impl From<hound::Error> for SpeechError {
    fn from(err: hound::Error) -> Self {
        SpeechError::InvalidAudio(err.to_string())
    }
}

impl From<SpeechError> for pharma_assist_core::Error {
    fn from(err: SpeechError) -> Self {
        match err {
            SpeechError::NoAudio | SpeechError::InvalidAudio(_) => {
                pharma_assist_core::Error::Audio(err.to_string())
            }
            other => pharma_assist_core::Error::Provider(other.to_string()),
        }
    }
}
