//! Interaction checker orchestrator
//!
//! Maintains the medication list (with its inline validation guards) and
//! runs the interaction check over it. The list itself never touches the
//! network; only `check` does.

use std::sync::Arc;

use parking_lot::RwLock;

use pharma_assist_core::{
    Error, InteractionReport, Language, QueryKind, Result, SpeechRecognizer, Translator,
};
use pharma_assist_llm::MedicationQueries;

use crate::context::AssistContext;
use crate::events::Notification;
use crate::submission::SubmitGate;

#[derive(Default)]
struct CheckerState {
    medications: Vec<String>,
    report: Option<InteractionReport>,
    listening: bool,
}

/// Multi-drug interaction orchestrator
pub struct InteractionChecker {
    queries: MedicationQueries,
    translator: Arc<dyn Translator>,
    recognizer: Arc<dyn SpeechRecognizer>,
    ctx: AssistContext,
    gate: Arc<SubmitGate>,
    state: Arc<RwLock<CheckerState>>,
}

impl InteractionChecker {
    /// Create the orchestrator over its ports and the shared context
    pub fn new(
        queries: MedicationQueries,
        translator: Arc<dyn Translator>,
        recognizer: Arc<dyn SpeechRecognizer>,
        ctx: AssistContext,
    ) -> Self {
        Self {
            queries,
            translator,
            recognizer,
            ctx,
            gate: SubmitGate::new(),
            state: Arc::new(RwLock::new(CheckerState::default())),
        }
    }

    /// Add a medication to the list
    ///
    /// Rejects blank names and case-insensitive duplicates with an inline
    /// field error; the list is left unchanged and no adapter is called.
    pub fn add_medication(&self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::validation("Medication name cannot be empty."));
        }

        let mut state = self.state.write();
        if state
            .medications
            .iter()
            .any(|existing| existing.eq_ignore_ascii_case(name))
        {
            return Err(Error::validation(format!(
                "\"{name}\" is already in the list."
            )));
        }
        state.medications.push(name.to_string());
        Ok(())
    }

    /// Remove a medication from the list (case-insensitive)
    pub fn remove_medication(&self, name: &str) {
        self.state
            .write()
            .medications
            .retain(|existing| !existing.eq_ignore_ascii_case(name.trim()));
    }

    /// Empty the medication list; the last report stays visible
    pub fn clear_medications(&self) {
        self.state.write().medications.clear();
    }

    /// Current medication list, in insertion order
    pub fn medications(&self) -> Vec<String> {
        self.state.read().medications.clone()
    }

    /// Check interactions across the current list
    ///
    /// Rejected client-side with fewer than two names; the adapter is not
    /// invoked in that case.
    pub async fn check(&self) -> Result<InteractionReport> {
        let names = self.state.read().medications.clone();
        if names.len() < 2 {
            return Err(Error::validation(
                "Add at least two medications to check interactions.",
            ));
        }

        let generation = self.gate.begin()?;
        self.state.write().report = None;

        let outcome = self.run_check(&names, generation).await;
        self.gate.finish();

        if let Err(e) = &outcome {
            self.ctx.notify(Notification::error(e.to_string()));
        }
        outcome
    }

    async fn run_check(&self, names: &[String], generation: u64) -> Result<InteractionReport> {
        let report = self.queries.check_interactions(names).await?;

        let locale = self.ctx.locale.get();
        let report = if locale.is_default() {
            report
        } else {
            self.translate_report(report, locale).await
        };

        self.ctx.history.append(QueryKind::Interaction, names.to_vec());

        if self.gate.is_current(generation) {
            self.state.write().report = Some(report.clone());
        }
        Ok(report)
    }

    /// Translate the single report field; falls back to the original on failure
    async fn translate_report(
        &self,
        report: InteractionReport,
        locale: Language,
    ) -> InteractionReport {
        match self.translator.translate(&report.report, locale).await {
            Ok(translated) => InteractionReport { report: translated },
            Err(_) => {
                self.ctx.notify(Notification::info(
                    "Translation failed. Showing the original response.",
                ));
                report
            }
        }
    }

    /// Capture one dictated utterance into the medication-name input
    ///
    /// The recognized text feeds the same add path as typed input.
    pub async fn dictate_medication(&self) -> Result<()> {
        if !self.recognizer.is_available() {
            self.ctx.notify(Notification::info(
                "Speech recognition is not available on this device.",
            ));
            return Err(Error::validation("Speech recognition is not available."));
        }
        {
            let mut state = self.state.write();
            if state.listening {
                return Err(Error::validation("A dictation session is already active."));
            }
            state.listening = true;
        }

        let recognized = self.recognizer.recognize_once(self.ctx.locale.get()).await;
        self.state.write().listening = false;

        match recognized {
            Ok(transcript) => self.add_medication(&transcript),
            Err(e) => {
                self.ctx.notify(Notification::error(e.to_string()));
                Err(e)
            }
        }
    }

    /// Current report, if any
    pub fn report(&self) -> Option<InteractionReport> {
        self.state.read().report.clone()
    }

    /// True while a check is pending
    pub fn is_submitting(&self) -> bool {
        self.gate.is_submitting()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HistoryStore;
    use crate::testing::{FailingTranslator, FlakyModel, ScriptedRecognizer};
    use pharma_assist_core::QueryText;

    fn checker_with(
        ctx: AssistContext,
        model: Arc<FlakyModel>,
        translator: Arc<FailingTranslator>,
    ) -> InteractionChecker {
        InteractionChecker::new(
            MedicationQueries::new(model),
            translator,
            Arc::new(ScriptedRecognizer::unavailable()),
            ctx,
        )
    }

    fn ctx_with_locale(locale: Language) -> AssistContext {
        AssistContext::new(locale, Arc::new(HistoryStore::in_memory()))
    }

    #[test]
    fn test_duplicate_add_is_case_insensitive() {
        let checker = checker_with(
            ctx_with_locale(Language::English),
            FlakyModel::with_reply("report"),
            Arc::new(FailingTranslator::succeeding()),
        );

        checker.add_medication("Aspirin").unwrap();
        let err = checker.add_medication("  aspirin ").unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("already in the list"));
        assert_eq!(checker.medications(), vec!["Aspirin".to_string()]);
    }

    #[test]
    fn test_blank_add_rejected() {
        let checker = checker_with(
            ctx_with_locale(Language::English),
            FlakyModel::with_reply("report"),
            Arc::new(FailingTranslator::succeeding()),
        );

        assert!(checker.add_medication("   ").unwrap_err().is_validation());
        assert!(checker.medications().is_empty());
    }

    #[tokio::test]
    async fn test_fewer_than_two_rejects_without_adapter_call() {
        let model = FlakyModel::with_reply("report");
        let checker = checker_with(
            ctx_with_locale(Language::English),
            model.clone(),
            Arc::new(FailingTranslator::succeeding()),
        );

        checker.add_medication("Aspirin").unwrap();
        let err = checker.check().await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_check_translates_report_for_french_locale() {
        let ctx = ctx_with_locale(Language::French);
        let model = FlakyModel::with_reply("Aspirin and Warfarin increase bleeding risk.");
        let translator = Arc::new(FailingTranslator::succeeding());
        let checker = checker_with(ctx.clone(), model, translator.clone());

        checker.add_medication("Aspirin").unwrap();
        checker.add_medication("Warfarin").unwrap();
        let report = checker.check().await.unwrap();

        assert_eq!(
            report.report,
            "[fr] Aspirin and Warfarin increase bleeding risk."
        );
        assert_eq!(translator.calls(), 1);

        let items = ctx.history.list();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind, QueryKind::Interaction);
        assert_eq!(
            items[0].query,
            QueryText::List(vec!["Aspirin".to_string(), "Warfarin".to_string()])
        );
    }

    #[tokio::test]
    async fn test_failed_translation_keeps_original_report() {
        let ctx = ctx_with_locale(Language::Spanish);
        let model = FlakyModel::with_reply("No significant interactions are known.");
        let checker = checker_with(
            ctx.clone(),
            model,
            Arc::new(FailingTranslator::failing_all()),
        );

        checker.add_medication("Aspirin").unwrap();
        checker.add_medication("Warfarin").unwrap();
        let report = checker.check().await.unwrap();

        assert_eq!(report.report, "No significant interactions are known.");
        // History is still recorded: the primary request succeeded.
        assert_eq!(ctx.history.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_medication() {
        let checker = checker_with(
            ctx_with_locale(Language::English),
            FlakyModel::with_reply("report"),
            Arc::new(FailingTranslator::succeeding()),
        );

        checker.add_medication("Aspirin").unwrap();
        checker.add_medication("Warfarin").unwrap();
        checker.remove_medication("aspirin");
        assert_eq!(checker.medications(), vec!["Warfarin".to_string()]);
    }

    #[tokio::test]
    async fn test_dictation_adds_to_list() {
        let ctx = ctx_with_locale(Language::English);
        let checker = InteractionChecker::new(
            MedicationQueries::new(FlakyModel::with_reply("report")),
            Arc::new(FailingTranslator::succeeding()),
            Arc::new(ScriptedRecognizer::with_transcript("Warfarin")),
            ctx,
        );

        checker.dictate_medication().await.unwrap();
        assert_eq!(checker.medications(), vec!["Warfarin".to_string()]);
    }
}
