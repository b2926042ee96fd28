use super::speech_repository::{AudioStream, SpeechRepository};
use super::text_splitter::split_into_parts;
use crate::domain::speech::{LanguageCode, SpeechLanguageDetector};
use async_openai::{
    config::OpenAIConfig,
    types::{CreateSpeechRequest, SpeechModel, Voice},
    Client,
};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::sync::Arc;

/// OpenAI has a limit of 4096 characters per request
const MAX_PART_SIZE: usize = 4096;

/// OpenAI TTS implementation of the speech repository
pub struct OpenAiSpeechRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    default_voice: String,
    language_detector: SpeechLanguageDetector,
}

impl OpenAiSpeechRepository {
    pub fn new(
        client: Arc<Client<OpenAIConfig>>,
        model: String,
        default_voice: String,
        language_detector: SpeechLanguageDetector,
    ) -> Self {
        Self {
            client,
            model,
            default_voice,
            language_detector,
        }
    }

    /// Select the appropriate OpenAI voice for a language
    fn get_voice_for_language(language: LanguageCode) -> Voice {
        match language {
            LanguageCode::English => Voice::Alloy,
            LanguageCode::Spanish => Voice::Echo,
            LanguageCode::French => Voice::Nova,
            LanguageCode::German => Voice::Onyx,
            LanguageCode::Italian => Voice::Fable,
            LanguageCode::Portuguese => Voice::Shimmer,
        }
    }

    fn parse_voice(voice: &str) -> Option<Voice> {
        match voice.to_lowercase().as_str() {
            "alloy" => Some(Voice::Alloy),
            "echo" => Some(Voice::Echo),
            "fable" => Some(Voice::Fable),
            "onyx" => Some(Voice::Onyx),
            "nova" => Some(Voice::Nova),
            "shimmer" => Some(Voice::Shimmer),
            _ => None,
        }
    }

    fn speech_model(&self) -> SpeechModel {
        match self.model.as_str() {
            "tts-1" => SpeechModel::Tts1,
            "tts-1-hd" => SpeechModel::Tts1Hd,
            other => SpeechModel::Other(other.to_string()),
        }
    }

    /// Call OpenAI TTS API to synthesize a single text part
    async fn call_openai(&self, text: &str, voice: Voice) -> Result<Vec<u8>, String> {
        tracing::info!(
            model = %self.model,
            voice = ?voice,
            text_length = text.len(),
            "Calling OpenAI TTS API"
        );

        let request = CreateSpeechRequest {
            model: self.speech_model(),
            input: text.to_string(),
            voice,
            response_format: None, // Defaults to MP3
            speed: None,
        };

        let response = self.client.audio().speech(request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                model = %self.model,
                text_length = text.len(),
                "OpenAI TTS API call failed"
            );
            format!("OpenAI TTS error: {}", e)
        })?;

        Ok(response.bytes.to_vec())
    }
}

#[async_trait]
impl SpeechRepository for OpenAiSpeechRepository {
    async fn speak(&self, text: &str) -> Result<AudioStream, String> {
        let start_time = std::time::Instant::now();

        let voice = Self::parse_voice(&self.default_voice).unwrap_or_else(|| {
            Self::get_voice_for_language(self.language_detector.detect(text))
        });

        let parts = split_into_parts(text, MAX_PART_SIZE);

        // OpenAI answers with the whole file, one chunk per part
        let mut chunks = Vec::with_capacity(parts.len());
        for part in &parts {
            chunks.push(self.call_openai(part, voice.clone()).await?);
        }

        tracing::info!(
            provider = "openai",
            model = %self.model,
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.len(),
            part_count = parts.len(),
            audio_size_bytes = chunks.iter().map(Vec::len).sum::<usize>(),
            "TTS synthesis completed"
        );

        Ok(stream::iter(chunks.into_iter().map(Ok::<_, String>)).boxed())
    }
}
