use crate::AdviceResult;
use async_trait::async_trait;

/// Prompt-in, text-out generation backend.
///
/// Implementations make a single attempt per call; retry and fallback policy belong to the
/// caller.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> AdviceResult<String>;
}

#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for std::sync::Arc<T> {
    async fn generate(&self, prompt: &str) -> AdviceResult<String> {
        (**self).generate(prompt).await
    }
}
