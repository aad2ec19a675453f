//! End-to-end orchestration scenarios over mock ports

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use pharma_assist_agent::{AssistContext, HistoryStore, MedicationLookup};
use pharma_assist_core::{
    Error, GenerateRequest, GenerativeModel, Language, QueryKind, QueryText, Result,
    SpeechPayload, SpeechRecognizer, SpeechSynthesizer, Translator,
};
use pharma_assist_llm::MedicationQueries;

const INFO_REPLY: &str =
    r#"{"uses":"pain relief","sideEffects":"nausea","dosageGuidelines":"one tablet daily"}"#;

struct CannedModel {
    calls: AtomicUsize,
    reply: String,
}

impl CannedModel {
    fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            reply: reply.to_string(),
        })
    }
}

#[async_trait]
impl GenerativeModel for CannedModel {
    async fn generate(&self, _request: GenerateRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }

    fn model_name(&self) -> &str {
        "canned-model"
    }
}

/// Translator that fails only for texts containing a marker substring
struct MarkedTranslator {
    calls: AtomicUsize,
    fail_marker: Option<String>,
}

impl MarkedTranslator {
    fn succeeding() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail_marker: None,
        })
    }

    fn failing_on(marker: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail_marker: Some(marker.to_string()),
        })
    }
}

#[async_trait]
impl Translator for MarkedTranslator {
    async fn translate(&self, text: &str, target: Language) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self
            .fail_marker
            .as_deref()
            .is_some_and(|marker| text.contains(marker))
        {
            return Err(Error::provider_failure("translating the response"));
        }
        Ok(format!("[{}] {text}", target.code()))
    }

    fn name(&self) -> &str {
        "marked-translator"
    }
}

struct SilentSpeech;

#[async_trait]
impl SpeechSynthesizer for SilentSpeech {
    async fn synthesize(&self, _text: &str) -> Result<SpeechPayload> {
        Ok(SpeechPayload {
            audio_data_uri: "data:audio/wav;base64,AAAA".to_string(),
        })
    }

    fn voice_name(&self) -> &str {
        "silent"
    }
}

struct NoRecognizer;

#[async_trait]
impl SpeechRecognizer for NoRecognizer {
    fn is_available(&self) -> bool {
        false
    }

    async fn recognize_once(&self, _language: Language) -> Result<String> {
        Err(Error::validation("Speech recognition is not available."))
    }
}

fn lookup(
    locale: Language,
    model: Arc<CannedModel>,
    translator: Arc<MarkedTranslator>,
) -> (MedicationLookup, AssistContext) {
    let ctx = AssistContext::new(locale, Arc::new(HistoryStore::in_memory()));
    let orchestrator = MedicationLookup::new(
        MedicationQueries::new(model),
        translator,
        Arc::new(SilentSpeech),
        Arc::new(NoRecognizer),
        ctx.clone(),
    );
    (orchestrator, ctx)
}

#[tokio::test]
async fn aspirin_default_locale_records_one_entry_without_translation() {
    let model = CannedModel::new(INFO_REPLY);
    let translator = MarkedTranslator::succeeding();
    let (orchestrator, ctx) = lookup(Language::English, model.clone(), translator.clone());

    let info = orchestrator.submit("Aspirin").await.unwrap();
    assert_eq!(info.uses, "pain relief");
    assert_eq!(info.side_effects, "nausea");
    assert_eq!(info.dosage_guidelines, "one tablet daily");

    let items = ctx.history.list();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].kind, QueryKind::Info);
    assert_eq!(items[0].query, QueryText::Single("Aspirin".to_string()));

    assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    assert_eq!(translator.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn non_default_locale_translates_every_field() {
    let translator = MarkedTranslator::succeeding();
    let (orchestrator, _ctx) = lookup(
        Language::French,
        CannedModel::new(INFO_REPLY),
        translator.clone(),
    );

    let info = orchestrator.submit("Aspirin").await.unwrap();
    assert_eq!(info.uses, "[fr] pain relief");
    assert_eq!(info.side_effects, "[fr] nausea");
    assert_eq!(info.dosage_guidelines, "[fr] one tablet daily");
    assert_eq!(translator.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn one_failed_translation_discards_all_translated_fields() {
    // The side-effects field fails; the displayed result must be the
    // complete original, not a partial mix.
    let translator = MarkedTranslator::failing_on("nausea");
    let (orchestrator, ctx) = lookup(
        Language::Spanish,
        CannedModel::new(INFO_REPLY),
        translator.clone(),
    );
    let mut notifications = ctx.subscribe();

    let info = orchestrator.submit("Aspirin").await.unwrap();
    assert_eq!(info.uses, "pain relief");
    assert_eq!(info.side_effects, "nausea");
    assert_eq!(info.dosage_guidelines, "one tablet daily");
    assert_eq!(translator.calls.load(Ordering::SeqCst), 3);

    let note = notifications.recv().await.unwrap();
    assert!(note.message.contains("Translation failed"));

    // Degraded success still records history.
    assert_eq!(ctx.history.len(), 1);
    assert_eq!(orchestrator.result().unwrap(), info);
}

#[tokio::test]
async fn orchestrators_share_one_history() {
    let ctx = AssistContext::new(Language::English, Arc::new(HistoryStore::in_memory()));

    let info_model = CannedModel::new(INFO_REPLY);
    let lookup = MedicationLookup::new(
        MedicationQueries::new(info_model),
        MarkedTranslator::succeeding(),
        Arc::new(SilentSpeech),
        Arc::new(NoRecognizer),
        ctx.clone(),
    );

    let checker = pharma_assist_agent::InteractionChecker::new(
        MedicationQueries::new(CannedModel::new("Bleeding risk increases.")),
        MarkedTranslator::succeeding(),
        Arc::new(NoRecognizer),
        ctx.clone(),
    );

    checker.add_medication("Aspirin").unwrap();
    checker.add_medication("Warfarin").unwrap();

    lookup.submit("Aspirin").await.unwrap();
    checker.check().await.unwrap();

    let items = ctx.history.list();
    assert_eq!(items.len(), 2);
    // Newest first: the interaction check landed last.
    assert_eq!(items[0].kind, QueryKind::Interaction);
    assert_eq!(items[1].kind, QueryKind::Info);
}
