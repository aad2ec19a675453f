//! Translation adapter
//!
//! Translation goes through the same generative model as the lookups. The
//! orchestrators fan this out once per free-text output field and treat any
//! failure as all-or-nothing.

use std::sync::Arc;

use async_trait::async_trait;

use pharma_assist_core::{Error, GenerativeModel, Language, Result, Translator};

use crate::prompt;

/// Translator backed by the generative model
#[derive(Clone)]
pub struct LlmTranslator {
    model: Arc<dyn GenerativeModel>,
}

impl LlmTranslator {
    /// Create a translator over a model backend
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }
}

#[async_trait]
impl Translator for LlmTranslator {
    async fn translate(&self, text: &str, target: Language) -> Result<String> {
        if text.trim().is_empty() {
            return Err(Error::validation("Text to translate cannot be empty."));
        }

        match self.model.generate(prompt::translation(text, target)).await {
            Ok(translated) => Ok(translated.trim().to_string()),
            Err(e) => {
                tracing::error!(target = target.code(), error = %e, "Translation failed");
                Err(Error::provider_failure("translating the response"))
            }
        }
    }

    fn name(&self) -> &str {
        self.model.model_name()
    }
}
