//! Speech recognition port implementations
//!
//! Dictation capture ultimately lives with the client; server-side the
//! capability is modelled as an injected port so orchestrators never probe
//! for it at runtime.

use async_trait::async_trait;

use pharma_assist_core::{Error, Language, Result, SpeechRecognizer};

/// The stand-in recognizer used when no dictation capability is present
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRecognizer;

#[async_trait]
impl SpeechRecognizer for NoopRecognizer {
    fn is_available(&self) -> bool {
        false
    }

    async fn recognize_once(&self, _language: Language) -> Result<String> {
        Err(Error::validation(
            "Speech recognition is not available on this device.",
        ))
    }
}
