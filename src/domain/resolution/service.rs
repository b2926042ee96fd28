use super::error::ResolveError;
use super::key::{speech_key, translation_key};
use super::Resolution;
use crate::infrastructure::repositories::{
    CacheRepository, SpeechRepository, StorageError, StorageRepository, TranslationRepository,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Cache-aside resolution of one source text into its translation and
/// speech URL.
///
/// Two cache entries exist per resolved text: the translation, keyed by the
/// source text, and the speech URL, keyed by the translated text. Both are
/// written by `store_pair` only, translation first.
pub struct ResolverService {
    cache_repo: Arc<dyn CacheRepository>,
    translation_repo: Arc<dyn TranslationRepository>,
    speech_repo: Arc<dyn SpeechRepository>,
    storage_repo: Arc<dyn StorageRepository>,
}

impl ResolverService {
    pub fn new(
        cache_repo: Arc<dyn CacheRepository>,
        translation_repo: Arc<dyn TranslationRepository>,
        speech_repo: Arc<dyn SpeechRepository>,
        storage_repo: Arc<dyn StorageRepository>,
    ) -> Self {
        Self {
            cache_repo,
            translation_repo,
            speech_repo,
            storage_repo,
        }
    }
}

#[async_trait]
pub trait ResolverServiceApi: Send + Sync {
    /// Resolve one source text.
    ///
    /// On a cache hit this makes no external call besides two cache reads.
    /// On a miss it translates, synthesizes, stores the audio and caches the
    /// pair, each step awaited before the next starts. Both cache entries are
    /// written last, once the audio is stored, so a failed synthesis or upload
    /// leaves no translation entry behind.
    async fn resolve(&self, text: &str) -> Result<Resolution, ResolveError>;
}

#[async_trait]
impl ResolverServiceApi for ResolverService {
    async fn resolve(&self, text: &str) -> Result<Resolution, ResolveError> {
        // 1. Check the translation entry
        if let Some(translation) = self.cache_get(&translation_key(text)).await? {
            // 2. A translation entry implies its speech entry
            if let Some(speech_url) = self.cache_get(&speech_key(&translation)).await? {
                tracing::info!(
                    text = %text,
                    speech_url = %speech_url,
                    "Resolution cache hit"
                );
                return Ok(Resolution {
                    translation,
                    speech_url,
                });
            }

            tracing::warn!(
                text = %text,
                translation = %translation,
                "Translation cached without speech entry, synthesizing again"
            );
            let speech_url = self.synthesize_and_store(&translation).await?;
            self.store_pair(text, &translation, &speech_url).await?;

            return Ok(Resolution {
                translation,
                speech_url,
            });
        }

        tracing::info!(text = %text, "Resolution cache miss");

        // 3. Translate, synthesize, store, then cache both entries
        let translation = self.translate(text).await?;
        let speech_url = self.synthesize_and_store(&translation).await?;
        self.store_pair(text, &translation, &speech_url).await?;

        Ok(Resolution {
            translation,
            speech_url,
        })
    }
}

impl ResolverService {
    async fn cache_get(&self, key: &str) -> Result<Option<String>, ResolveError> {
        self.cache_repo
            .get(key)
            .await
            .map_err(ResolveError::CacheUnavailable)
    }

    async fn translate(&self, text: &str) -> Result<String, ResolveError> {
        let translation = self
            .translation_repo
            .translate(text)
            .await
            .map_err(ResolveError::Translation)?;

        if translation.trim().is_empty() && !text.trim().is_empty() {
            return Err(ResolveError::Translation(format!(
                "empty translation for {:?}",
                text
            )));
        }

        tracing::debug!(text = %text, translation = %translation, "Text translated");
        Ok(translation)
    }

    /// Synthesize speech for `translation` and persist the audio.
    /// Synthesis completes before storage starts consuming the stream.
    async fn synthesize_and_store(&self, translation: &str) -> Result<String, ResolveError> {
        let audio = self
            .speech_repo
            .speak(translation)
            .await
            .map_err(ResolveError::SpeechSynthesis)?;

        self.storage_repo
            .store(audio)
            .await
            .map_err(|e| match e {
                StorageError::AudioStream(msg) => ResolveError::SpeechSynthesis(msg),
                StorageError::Write(msg) => ResolveError::Storage(msg),
            })
    }

    /// Write the translation entry and its paired speech entry
    async fn store_pair(
        &self,
        text: &str,
        translation: &str,
        speech_url: &str,
    ) -> Result<(), ResolveError> {
        self.cache_repo
            .set(&translation_key(text), translation)
            .await
            .map_err(ResolveError::CacheUnavailable)?;
        self.cache_repo
            .set(&speech_key(translation), speech_url)
            .await
            .map_err(ResolveError::CacheUnavailable)?;

        tracing::debug!(
            text = %text,
            translation = %translation,
            speech_url = %speech_url,
            "Resolution cached"
        );
        Ok(())
    }
}
