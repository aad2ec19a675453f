//! Application state
//!
//! Composes the three orchestrators over shared ports and context. The
//! shell role from the original UI lives here: one locale, one history
//! store, three independent orchestrators.

use std::sync::Arc;

use pharma_assist_agent::{
    AssistContext, DocumentAnalyzer, HistoryStore, InteractionChecker, MedicationLookup,
};
use pharma_assist_config::Settings;
use pharma_assist_core::{GenerativeModel, SpeechRecognizer, SpeechSynthesizer, Translator};
use pharma_assist_llm::{LlmTranslator, MedicationQueries};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub ctx: AssistContext,
    pub lookup: Arc<MedicationLookup>,
    pub interactions: Arc<InteractionChecker>,
    pub documents: Arc<DocumentAnalyzer>,
}

impl AppState {
    /// Wire the orchestrators over the given ports
    pub fn new(
        config: Settings,
        model: Arc<dyn GenerativeModel>,
        speech: Arc<dyn SpeechSynthesizer>,
        recognizer: Arc<dyn SpeechRecognizer>,
        history: Arc<HistoryStore>,
    ) -> Self {
        let ctx = AssistContext::new(config.locale, history);
        let translator: Arc<dyn Translator> = Arc::new(LlmTranslator::new(model.clone()));

        let lookup = Arc::new(MedicationLookup::new(
            MedicationQueries::new(model.clone()),
            translator.clone(),
            speech,
            recognizer.clone(),
            ctx.clone(),
        ));
        let interactions = Arc::new(InteractionChecker::new(
            MedicationQueries::new(model.clone()),
            translator.clone(),
            recognizer,
            ctx.clone(),
        ));
        let documents = Arc::new(DocumentAnalyzer::new(
            MedicationQueries::new(model),
            translator,
            ctx.clone(),
        ));

        Self {
            config: Arc::new(config),
            ctx,
            lookup,
            interactions,
            documents,
        }
    }
}
