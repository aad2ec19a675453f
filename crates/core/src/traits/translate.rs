//! Translation trait

use async_trait::async_trait;

use crate::error::Result;
use crate::language::Language;

/// Translation interface
///
/// Implementations:
/// - `LlmTranslator` - translation through the generative model
///
/// Orchestrators call this once per free-text output field, in parallel,
/// whenever the active locale is not the default.
#[async_trait]
pub trait Translator: Send + Sync + 'static {
    /// Translate text into the target locale
    ///
    /// # Arguments
    /// * `text` - Text to translate
    /// * `target` - Target locale
    ///
    /// # Returns
    /// Translated text
    async fn translate(&self, text: &str, target: Language) -> Result<String>;

    /// Get translator name for logging
    fn name(&self) -> &str;
}
