use super::speech_repository::{AudioStream, SpeechRepository};
use super::text_splitter::split_into_parts;
use crate::domain::speech::{LanguageCode, SpeechLanguageDetector};
use async_trait::async_trait;
use aws_sdk_polly::{
    primitives::ByteStream,
    types::{Engine, OutputFormat, VoiceId},
    Client as PollyClient,
};
use futures::stream::{self, Stream, StreamExt};
use std::sync::Arc;

/// AWS Polly has a limit of 3000 characters per request
const MAX_PART_SIZE: usize = 3000;

/// AWS Polly implementation of the speech repository
pub struct PollySpeechRepository {
    polly_client: Arc<PollyClient>,
    language_detector: SpeechLanguageDetector,
}

impl PollySpeechRepository {
    pub fn new(polly_client: Arc<PollyClient>, language_detector: SpeechLanguageDetector) -> Self {
        Self {
            polly_client,
            language_detector,
        }
    }

    /// Select the appropriate Polly neural voice for a language
    fn get_voice_for_language(language: LanguageCode) -> &'static str {
        match language {
            LanguageCode::English => "Joanna",
            LanguageCode::Spanish => "Lupe",
            LanguageCode::French => "Lea",
            LanguageCode::German => "Vicki",
            LanguageCode::Italian => "Bianca",
            LanguageCode::Portuguese => "Ines",
        }
    }

    /// Call AWS Polly for a single text part; the audio body is not read yet
    async fn call_polly(&self, text: &str, language: LanguageCode) -> Result<ByteStream, String> {
        let voice_name = Self::get_voice_for_language(language);
        let voice_id = VoiceId::from(voice_name);

        tracing::info!(
            language = %language,
            voice = voice_name,
            output_format = "Mp3",
            text_length = text.len(),
            "Calling AWS Polly synthesize_speech"
        );

        let result = self
            .polly_client
            .synthesize_speech()
            .text(text)
            .voice_id(voice_id)
            .output_format(OutputFormat::Mp3)
            .engine(Engine::Neural)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = ?e,
                    error_display = %e,
                    language = %language,
                    voice = voice_name,
                    text_length = text.len(),
                    "AWS Polly synthesize_speech failed"
                );
                format!("AWS Polly error: {:?}", e)
            })?;

        Ok(result.audio_stream)
    }
}

/// Adapt a Polly audio body into owned chunks
fn audio_chunks(body: ByteStream) -> impl Stream<Item = Result<Vec<u8>, String>> + Send {
    stream::unfold(Some(body), |state| async move {
        let mut body = state?;
        match body.next().await {
            Some(Ok(bytes)) => Some((Ok(bytes.to_vec()), Some(body))),
            Some(Err(e)) => {
                tracing::error!(error = %e, "Failed to read audio stream from Polly response");
                Some((Err(format!("Failed to read audio stream: {}", e)), None))
            }
            None => None,
        }
    })
}

#[async_trait]
impl SpeechRepository for PollySpeechRepository {
    async fn speak(&self, text: &str) -> Result<AudioStream, String> {
        let start_time = std::time::Instant::now();
        let language = self.language_detector.detect(text);

        let parts = split_into_parts(text, MAX_PART_SIZE);
        tracing::info!(
            part_count = parts.len(),
            text_length = text.len(),
            language = %language,
            "Text split into parts"
        );

        // Every part is requested up front so a rejected input fails here
        let mut bodies = Vec::with_capacity(parts.len());
        for (index, part) in parts.iter().enumerate() {
            bodies.push(self.call_polly(part, language).await?);
            tracing::debug!(part_index = index, "Polly part accepted");
        }

        tracing::info!(
            provider = "polly",
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.len(),
            part_count = parts.len(),
            "TTS synthesis started"
        );

        Ok(stream::iter(bodies).map(audio_chunks).flatten().boxed())
    }
}
