//! Generative model trait

use async_trait::async_trait;

use crate::error::Result;
use crate::request::GenerateRequest;

/// Hosted generative model interface
///
/// Implementations:
/// - `GeminiBackend` - Gemini REST API
///
/// # Example
///
/// ```ignore
/// let model: Arc<dyn GenerativeModel> = Arc::new(GeminiBackend::new(config)?);
/// let request = GenerateRequest::new("What is aspirin used for?");
/// let text = model.generate(request).await?;
/// ```
#[async_trait]
pub trait GenerativeModel: Send + Sync + 'static {
    /// Run one generation request and return the reply text
    ///
    /// Exactly one provider call per invocation; adapters layer their own
    /// validation and error normalization on top.
    async fn generate(&self, request: GenerateRequest) -> Result<String>;

    /// Get model name for logging
    fn model_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockModel;

    #[async_trait]
    impl GenerativeModel for MockModel {
        async fn generate(&self, request: GenerateRequest) -> Result<String> {
            Ok(format!("reply to: {}", request.prompt))
        }

        fn model_name(&self) -> &str {
            "mock-model"
        }
    }

    #[tokio::test]
    async fn test_mock_model() {
        let model = MockModel;
        assert_eq!(model.model_name(), "mock-model");

        let reply = model
            .generate(GenerateRequest::new("Hello"))
            .await
            .unwrap();
        assert_eq!(reply, "reply to: Hello");
    }
}
