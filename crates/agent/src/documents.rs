//! Document analyzer orchestrator
//!
//! Runs uploaded document images through the analysis adapter. Size and
//! type limits are enforced by `DocumentUpload::validate` inside the
//! adapter, before the provider is ever contacted.

use std::sync::Arc;

use parking_lot::RwLock;

use pharma_assist_core::{
    DocumentAnalysis, DocumentUpload, Language, QueryKind, Result, Translator,
};
use pharma_assist_llm::MedicationQueries;

use crate::context::AssistContext;
use crate::events::Notification;
use crate::submission::SubmitGate;

#[derive(Default)]
struct AnalyzerState {
    result: Option<DocumentAnalysis>,
}

/// Document analysis orchestrator
pub struct DocumentAnalyzer {
    queries: MedicationQueries,
    translator: Arc<dyn Translator>,
    ctx: AssistContext,
    gate: Arc<SubmitGate>,
    state: Arc<RwLock<AnalyzerState>>,
}

impl DocumentAnalyzer {
    /// Create the orchestrator over its ports and the shared context
    pub fn new(
        queries: MedicationQueries,
        translator: Arc<dyn Translator>,
        ctx: AssistContext,
    ) -> Self {
        Self {
            queries,
            translator,
            ctx,
            gate: SubmitGate::new(),
            state: Arc::new(RwLock::new(AnalyzerState::default())),
        }
    }

    /// Analyze an uploaded document
    pub async fn analyze(&self, upload: DocumentUpload) -> Result<DocumentAnalysis> {
        let generation = self.gate.begin()?;
        self.state.write().result = None;

        let outcome = self.run_analyze(&upload, generation).await;
        self.gate.finish();

        if let Err(e) = &outcome {
            self.ctx.notify(Notification::error(e.to_string()));
        }
        outcome
    }

    async fn run_analyze(
        &self,
        upload: &DocumentUpload,
        generation: u64,
    ) -> Result<DocumentAnalysis> {
        let analysis = self.queries.analyze_document(upload).await?;

        let locale = self.ctx.locale.get();
        let analysis = if locale.is_default() {
            analysis
        } else {
            self.translate_analysis(analysis, locale).await
        };

        self.ctx
            .history
            .append(QueryKind::Document, upload.filename.as_str());

        if self.gate.is_current(generation) {
            self.state.write().result = Some(analysis.clone());
        }
        Ok(analysis)
    }

    /// Translate the single analysis field; falls back to the original on failure
    async fn translate_analysis(
        &self,
        analysis: DocumentAnalysis,
        locale: Language,
    ) -> DocumentAnalysis {
        match self.translator.translate(&analysis.analysis, locale).await {
            Ok(translated) => DocumentAnalysis {
                analysis: translated,
            },
            Err(_) => {
                self.ctx.notify(Notification::info(
                    "Translation failed. Showing the original response.",
                ));
                analysis
            }
        }
    }

    /// Current analysis, if any
    pub fn result(&self) -> Option<DocumentAnalysis> {
        self.state.read().result.clone()
    }

    /// True while an analysis is pending
    pub fn is_submitting(&self) -> bool {
        self.gate.is_submitting()
    }
}
