//! Speech traits

use async_trait::async_trait;

use crate::error::Result;
use crate::language::Language;
use crate::results::SpeechPayload;

/// Speech synthesis interface
///
/// Implementations:
/// - `GeminiSpeech` - provider TTS, PCM re-encoded into a WAV data URI
///
/// # Example
///
/// ```ignore
/// let speech: Arc<dyn SpeechSynthesizer> = Arc::new(GeminiSpeech::new(config)?);
/// let payload = speech.synthesize("Uses: pain relief.").await?;
/// assert!(payload.audio_data_uri.starts_with("data:audio/wav;base64,"));
/// ```
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync + 'static {
    /// Synthesize narration for the given text
    async fn synthesize(&self, text: &str) -> Result<SpeechPayload>;

    /// Get the fixed voice name for logging
    fn voice_name(&self) -> &str;
}

/// Speech recognition capability
///
/// Dictation is optional: when no recognizer is present, the injected
/// implementation is `NoopRecognizer`, which reports unavailable instead of
/// being probed for at runtime.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync + 'static {
    /// Whether a recognition capability is present
    fn is_available(&self) -> bool;

    /// Capture a single utterance in the given locale
    ///
    /// Resolves with one final transcript, then the session is over; there
    /// are no partial results at this boundary.
    async fn recognize_once(&self, language: Language) -> Result<String>;
}
