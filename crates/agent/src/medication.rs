//! Medication lookup orchestrator
//!
//! Owns the full cycle for the medication-info feature: input (typed or
//! dictated), the lookup adapter, optional per-field translation, the
//! history entry, fire-and-forget narration, and the read-aloud toggle.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::task::JoinHandle;

use pharma_assist_core::{
    Language, MedicationInfo, QueryKind, Result, SpeechPayload, SpeechRecognizer,
    SpeechSynthesizer, Translator,
};
use pharma_assist_llm::MedicationQueries;

use crate::context::AssistContext;
use crate::events::Notification;
use crate::submission::SubmitGate;

/// Read-aloud playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Not playing; the next start begins from the top
    #[default]
    Stopped,
    Playing,
}

#[derive(Default)]
struct LookupState {
    result: Option<MedicationInfo>,
    audio: Option<SpeechPayload>,
    playback: PlaybackState,
    listening: bool,
    narration: Option<JoinHandle<()>>,
}

/// Medication information orchestrator
pub struct MedicationLookup {
    queries: MedicationQueries,
    translator: Arc<dyn Translator>,
    speech: Arc<dyn SpeechSynthesizer>,
    recognizer: Arc<dyn SpeechRecognizer>,
    ctx: AssistContext,
    gate: Arc<SubmitGate>,
    state: Arc<RwLock<LookupState>>,
}

impl MedicationLookup {
    /// Create the orchestrator over its ports and the shared context
    pub fn new(
        queries: MedicationQueries,
        translator: Arc<dyn Translator>,
        speech: Arc<dyn SpeechSynthesizer>,
        recognizer: Arc<dyn SpeechRecognizer>,
        ctx: AssistContext,
    ) -> Self {
        Self {
            queries,
            translator,
            speech,
            recognizer,
            ctx,
            gate: SubmitGate::new(),
            state: Arc::new(RwLock::new(LookupState::default())),
        }
    }

    /// Submit a medication name
    ///
    /// Clears the previous result and audio, runs the lookup, translates
    /// when the locale is non-default, records one history entry, and kicks
    /// off narration without blocking the return.
    pub async fn submit(&self, name: &str) -> Result<MedicationInfo> {
        let generation = self.gate.begin()?;
        {
            let mut state = self.state.write();
            state.result = None;
            state.audio = None;
            state.playback = PlaybackState::Stopped;
            // A previous narration may still be in flight; its generation
            // token is stale now, so its result will be discarded.
            state.narration.take();
        }

        let outcome = self.run_submit(name, generation).await;
        self.gate.finish();

        if let Err(e) = &outcome {
            self.ctx.notify(Notification::error(e.to_string()));
        }
        outcome
    }

    async fn run_submit(&self, name: &str, generation: u64) -> Result<MedicationInfo> {
        let info = self.queries.medication_info(name).await?;

        let locale = self.ctx.locale.get();
        let info = if locale.is_default() {
            info
        } else {
            self.translate_fields(info, locale).await
        };

        self.ctx.history.append(QueryKind::Info, name.trim());

        if self.gate.is_current(generation) {
            self.state.write().result = Some(info.clone());
        }
        self.spawn_narration(info.summary(), generation);

        Ok(info)
    }

    /// Translate every output field in parallel; all-or-nothing
    async fn translate_fields(&self, info: MedicationInfo, locale: Language) -> MedicationInfo {
        let (uses, side_effects, dosage_guidelines) = tokio::join!(
            self.translator.translate(&info.uses, locale),
            self.translator.translate(&info.side_effects, locale),
            self.translator.translate(&info.dosage_guidelines, locale),
        );

        match (uses, side_effects, dosage_guidelines) {
            (Ok(uses), Ok(side_effects), Ok(dosage_guidelines)) => MedicationInfo {
                uses,
                side_effects,
                dosage_guidelines,
            },
            _ => {
                // Partial translations are never shown; fall back to the
                // complete original result.
                self.ctx.notify(Notification::info(
                    "Translation failed. Showing the original response.",
                ));
                info
            }
        }
    }

    /// Narrate the summary without blocking the result
    fn spawn_narration(&self, summary: String, generation: u64) {
        let speech = self.speech.clone();
        let state = self.state.clone();
        let gate = self.gate.clone();

        let handle = tokio::spawn(async move {
            match speech.synthesize(&summary).await {
                Ok(payload) => {
                    if gate.is_current(generation) {
                        state.write().audio = Some(payload);
                    } else {
                        tracing::debug!("Discarding narration for a superseded request");
                    }
                }
                Err(e) => {
                    // Degrades to "no audio available"; the text result is
                    // already visible.
                    tracing::warn!(error = %e, "Narration unavailable");
                }
            }
        });
        self.state.write().narration = Some(handle);
    }

    /// Capture one dictated utterance and feed it through `submit`
    pub async fn dictate(&self) -> Result<MedicationInfo> {
        if !self.recognizer.is_available() {
            self.ctx.notify(Notification::info(
                "Speech recognition is not available on this device.",
            ));
            return Err(pharma_assist_core::Error::validation(
                "Speech recognition is not available.",
            ));
        }
        {
            let mut state = self.state.write();
            if state.listening {
                return Err(pharma_assist_core::Error::validation(
                    "A dictation session is already active.",
                ));
            }
            state.listening = true;
        }

        let recognized = self.recognizer.recognize_once(self.ctx.locale.get()).await;
        // One utterance per session: listening ends on any terminal event.
        self.state.write().listening = false;

        match recognized {
            Ok(transcript) => self.submit(&transcript).await,
            Err(e) => {
                self.ctx.notify(Notification::error(e.to_string()));
                Err(e)
            }
        }
    }

    /// Toggle read-aloud playback
    ///
    /// Starting before the narration has arrived raises a "not ready"
    /// notification and stays stopped. Stopping resets the playback
    /// position to the start.
    pub fn toggle_read_aloud(&self) -> PlaybackState {
        let mut state = self.state.write();
        match state.playback {
            PlaybackState::Playing => {
                state.playback = PlaybackState::Stopped;
            }
            PlaybackState::Stopped => {
                if state.audio.is_none() {
                    drop(state);
                    self.ctx.notify(Notification::info(
                        "Audio is not ready yet. Please try again in a moment.",
                    ));
                    return PlaybackState::Stopped;
                }
                state.playback = PlaybackState::Playing;
            }
        }
        state.playback
    }

    /// Playback reached the end of the audio
    pub fn playback_ended(&self) {
        self.state.write().playback = PlaybackState::Stopped;
    }

    /// Playback failed; same reset as a normal end
    pub fn playback_failed(&self) {
        self.state.write().playback = PlaybackState::Stopped;
        self.ctx
            .notify(Notification::error("Audio playback failed."));
    }

    /// Current result, if any
    pub fn result(&self) -> Option<MedicationInfo> {
        self.state.read().result.clone()
    }

    /// Synthesized narration, once it has arrived
    pub fn audio(&self) -> Option<SpeechPayload> {
        self.state.read().audio.clone()
    }

    /// Current playback state
    pub fn playback(&self) -> PlaybackState {
        self.state.read().playback
    }

    /// True while a submission cycle is pending
    pub fn is_submitting(&self) -> bool {
        self.gate.is_submitting()
    }

    /// Take the in-flight narration handle, if any (used by tests and
    /// teardown to await settlement)
    pub fn take_narration_handle(&self) -> Option<JoinHandle<()>> {
        self.state.write().narration.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HistoryStore;
    use crate::testing::{FailingTranslator, FlakyModel, ScriptedRecognizer, TestSpeech};
    use pharma_assist_core::QueryText;

    fn lookup_with(
        ctx: AssistContext,
        model: Arc<FlakyModel>,
        speech: Arc<TestSpeech>,
    ) -> MedicationLookup {
        MedicationLookup::new(
            MedicationQueries::new(model),
            Arc::new(FailingTranslator::succeeding()),
            speech,
            Arc::new(ScriptedRecognizer::unavailable()),
            ctx,
        )
    }

    fn default_ctx() -> AssistContext {
        AssistContext::new(Language::English, Arc::new(HistoryStore::in_memory()))
    }

    #[tokio::test]
    async fn test_default_locale_records_history_without_translation() {
        let ctx = default_ctx();
        let model = FlakyModel::medication_info();
        let translator = Arc::new(FailingTranslator::succeeding());
        let lookup = MedicationLookup::new(
            MedicationQueries::new(model.clone()),
            translator.clone(),
            Arc::new(TestSpeech::default()),
            Arc::new(ScriptedRecognizer::unavailable()),
            ctx.clone(),
        );

        let info = lookup.submit("Aspirin").await.unwrap();
        assert_eq!(info.uses, "pain relief");

        let items = ctx.history.list();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind, QueryKind::Info);
        assert_eq!(items[0].query, QueryText::Single("Aspirin".to_string()));
        assert_eq!(translator.calls(), 0);
    }

    #[tokio::test]
    async fn test_failed_lookup_records_no_history_and_notifies() {
        let ctx = default_ctx();
        let mut rx = ctx.subscribe();
        let lookup = lookup_with(
            ctx.clone(),
            FlakyModel::failing(),
            Arc::new(TestSpeech::default()),
        );

        assert!(lookup.submit("Aspirin").await.is_err());
        assert!(ctx.history.is_empty());
        assert!(!lookup.is_submitting());

        let note = rx.recv().await.unwrap();
        assert!(note.message.contains("unexpected error"));
    }

    #[tokio::test]
    async fn test_read_aloud_not_ready_then_toggles() {
        let ctx = default_ctx();
        let mut rx = ctx.subscribe();
        let lookup = lookup_with(
            ctx.clone(),
            FlakyModel::medication_info(),
            Arc::new(TestSpeech::default()),
        );

        // Before any audio: stays stopped and raises "not ready".
        assert_eq!(lookup.toggle_read_aloud(), PlaybackState::Stopped);
        let note = rx.recv().await.unwrap();
        assert!(note.message.contains("not ready"));

        lookup.submit("Aspirin").await.unwrap();
        if let Some(handle) = lookup.take_narration_handle() {
            handle.await.unwrap();
        }
        assert!(lookup.audio().is_some());

        assert_eq!(lookup.toggle_read_aloud(), PlaybackState::Playing);
        assert_eq!(lookup.toggle_read_aloud(), PlaybackState::Stopped);
    }

    #[tokio::test]
    async fn test_playback_end_and_failure_reset() {
        let ctx = default_ctx();
        let lookup = lookup_with(
            ctx.clone(),
            FlakyModel::medication_info(),
            Arc::new(TestSpeech::default()),
        );

        lookup.submit("Aspirin").await.unwrap();
        if let Some(handle) = lookup.take_narration_handle() {
            handle.await.unwrap();
        }

        lookup.toggle_read_aloud();
        lookup.playback_ended();
        assert_eq!(lookup.playback(), PlaybackState::Stopped);

        lookup.toggle_read_aloud();
        lookup.playback_failed();
        assert_eq!(lookup.playback(), PlaybackState::Stopped);
    }

    #[tokio::test]
    async fn test_stale_narration_is_discarded() {
        let ctx = default_ctx();
        let first_reply =
            r#"{"uses":"pain relief","sideEffects":"nausea","dosageGuidelines":"daily"}"#;
        let second_reply =
            r#"{"uses":"fever reduction","sideEffects":"rash","dosageGuidelines":"daily"}"#;
        let model = FlakyModel::with_replies(&[first_reply, second_reply]);
        // The first submission's narration is held at the gate.
        let speech = Arc::new(TestSpeech::gated_matching("pain relief"));
        let lookup = lookup_with(ctx.clone(), model, speech.clone());

        lookup.submit("Aspirin").await.unwrap();
        let first_narration = lookup.take_narration_handle().unwrap();

        // Second submission supersedes the first before its narration lands.
        lookup.submit("Ibuprofen").await.unwrap();
        if let Some(handle) = lookup.take_narration_handle() {
            handle.await.unwrap();
        }

        speech.release();
        first_narration.await.unwrap();

        // The superseded narration resolved last but was discarded; the
        // audio belongs to the second submission.
        let audio = lookup.audio().unwrap();
        assert!(audio.audio_data_uri.contains("fever reduction"));
        assert_eq!(speech.calls(), 2);
    }

    #[tokio::test]
    async fn test_dictation_unavailable_notifies() {
        let ctx = default_ctx();
        let mut rx = ctx.subscribe();
        let lookup = lookup_with(
            ctx.clone(),
            FlakyModel::medication_info(),
            Arc::new(TestSpeech::default()),
        );

        assert!(lookup.dictate().await.is_err());
        let note = rx.recv().await.unwrap();
        assert!(note.message.contains("not available"));
        assert!(ctx.history.is_empty());
    }

    #[tokio::test]
    async fn test_dictation_feeds_submit_path() {
        let ctx = default_ctx();
        let lookup = MedicationLookup::new(
            MedicationQueries::new(FlakyModel::medication_info()),
            Arc::new(FailingTranslator::succeeding()),
            Arc::new(TestSpeech::default()),
            Arc::new(ScriptedRecognizer::with_transcript("Aspirin")),
            ctx.clone(),
        );

        let info = lookup.dictate().await.unwrap();
        assert_eq!(info.uses, "pain relief");
        assert_eq!(ctx.history.len(), 1);
    }
}
