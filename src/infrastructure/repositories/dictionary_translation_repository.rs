use super::translation_repository::TranslationRepository;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;

/// Offline translation repository backed by a fixed phrase table.
///
/// Texts missing from the table come back unchanged.
pub struct DictionaryTranslationRepository {
    phrases: HashMap<String, String>,
}

impl DictionaryTranslationRepository {
    pub fn new(phrases: HashMap<String, String>) -> Self {
        Self { phrases }
    }

    /// Load the phrase table from a JSON object of `source -> translation`
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("Failed to read dictionary {}: {}", path.display(), e))?;
        let phrases: HashMap<String, String> = serde_json::from_str(&raw)
            .map_err(|e| format!("Invalid dictionary {}: {}", path.display(), e))?;

        tracing::info!(
            path = %path.display(),
            phrase_count = phrases.len(),
            "Translation dictionary loaded"
        );

        Ok(Self::new(phrases))
    }
}

#[async_trait]
impl TranslationRepository for DictionaryTranslationRepository {
    async fn translate(&self, text: &str) -> Result<String, String> {
        match self.phrases.get(text) {
            Some(translated) => Ok(translated.clone()),
            None => {
                tracing::debug!(text = %text, "No dictionary entry, keeping source text");
                Ok(text.to_string())
            }
        }
    }
}
