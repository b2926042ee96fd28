use async_trait::async_trait;

/// Repository for text translation.
/// Abstracts the underlying provider (OpenAI, a static dictionary, etc.)
#[async_trait]
pub trait TranslationRepository: Send + Sync {
    /// Translate `text` into the configured target language.
    ///
    /// Providers may return the input unchanged when they have no
    /// translation for it.
    async fn translate(&self, text: &str) -> Result<String, String>;
}
