//! Mock ports shared by the orchestrator unit tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Semaphore;

use pharma_assist_core::{
    Error, GenerateRequest, GenerativeModel, Language, Result, SpeechPayload, SpeechRecognizer,
    SpeechSynthesizer, Translator,
};

pub const INFO_REPLY: &str =
    r#"{"uses":"pain relief","sideEffects":"nausea","dosageGuidelines":"one tablet daily"}"#;

/// Generative model mock with canned replies and a call counter
///
/// With several replies, each call consumes the next one; the last reply
/// repeats once the script runs out.
pub struct FlakyModel {
    calls: AtomicUsize,
    replies: Vec<String>,
}

impl FlakyModel {
    pub fn with_reply(reply: &str) -> Arc<Self> {
        Self::with_replies(&[reply])
    }

    pub fn with_replies(replies: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            replies: replies.iter().map(|r| r.to_string()).collect(),
        })
    }

    pub fn medication_info() -> Arc<Self> {
        Self::with_reply(INFO_REPLY)
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            replies: Vec::new(),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerativeModel for FlakyModel {
    async fn generate(&self, _request: GenerateRequest) -> Result<String> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        match self.replies.get(n).or_else(|| self.replies.last()) {
            Some(reply) => Ok(reply.clone()),
            None => Err(Error::provider("backend unavailable")),
        }
    }

    fn model_name(&self) -> &str {
        "flaky-model"
    }
}

/// Translator mock; optionally fails for all inputs or for inputs
/// containing a marker substring
pub struct FailingTranslator {
    calls: AtomicUsize,
    fail_all: bool,
    fail_matching: Option<String>,
}

impl FailingTranslator {
    pub fn succeeding() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_all: false,
            fail_matching: None,
        }
    }

    pub fn failing_all() -> Self {
        Self {
            fail_all: true,
            ..Self::succeeding()
        }
    }

    pub fn failing_matching(marker: &str) -> Self {
        Self {
            fail_matching: Some(marker.to_string()),
            ..Self::succeeding()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Translator for FailingTranslator {
    async fn translate(&self, text: &str, target: Language) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let matched = self
            .fail_matching
            .as_deref()
            .is_some_and(|marker| text.contains(marker));
        if self.fail_all || matched {
            return Err(Error::provider_failure("translating the response"));
        }
        Ok(format!("[{}] {text}", target.code()))
    }

    fn name(&self) -> &str {
        "failing-translator"
    }
}

/// Speech synthesizer mock; the payload embeds the narrated text so tests
/// can tell narrations apart. The gated variant blocks any text containing
/// the marker until `release`.
pub struct TestSpeech {
    calls: AtomicUsize,
    gate_matching: Option<String>,
    gate: Semaphore,
}

impl Default for TestSpeech {
    fn default() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            gate_matching: None,
            gate: Semaphore::new(0),
        }
    }
}

impl TestSpeech {
    pub fn gated_matching(marker: &str) -> Self {
        Self {
            gate_matching: Some(marker.to_string()),
            ..Self::default()
        }
    }

    pub fn release(&self) {
        self.gate.add_permits(1);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechSynthesizer for TestSpeech {
    async fn synthesize(&self, text: &str) -> Result<SpeechPayload> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let gated = self
            .gate_matching
            .as_deref()
            .is_some_and(|marker| text.contains(marker));
        if gated {
            let _permit = self.gate.acquire().await.expect("gate closed");
        }
        Ok(SpeechPayload {
            audio_data_uri: format!("data:audio/wav;base64,{text}"),
        })
    }

    fn voice_name(&self) -> &str {
        "test-voice"
    }
}

/// Recognizer mock: either unavailable or yielding one scripted utterance
pub struct ScriptedRecognizer {
    transcript: Option<String>,
}

impl ScriptedRecognizer {
    pub fn unavailable() -> Self {
        Self { transcript: None }
    }

    pub fn with_transcript(transcript: &str) -> Self {
        Self {
            transcript: Some(transcript.to_string()),
        }
    }
}

#[async_trait]
impl SpeechRecognizer for ScriptedRecognizer {
    fn is_available(&self) -> bool {
        self.transcript.is_some()
    }

    async fn recognize_once(&self, _language: Language) -> Result<String> {
        self.transcript
            .clone()
            .ok_or_else(|| Error::validation("Speech recognition is not available."))
    }
}
