use async_trait::async_trait;
use futures::stream::BoxStream;

/// Synthesized audio, delivered as a stream of binary chunks.
/// Consumed exactly once, by the storage repository.
pub type AudioStream = BoxStream<'static, Result<Vec<u8>, String>>;

/// Repository for text-to-speech synthesis.
/// Abstracts the underlying TTS provider (AWS Polly, OpenAI, etc.)
///
/// Implementations are responsible for:
/// - Handling provider-specific text length limitations
/// - Splitting text into parts if needed and chaining their audio in order
/// - Provider-specific voice selection
#[async_trait]
pub trait SpeechRepository: Send + Sync {
    /// Start synthesizing `text`.
    ///
    /// # Errors
    /// Returns error if the provider rejects the input or is unavailable.
    /// Failures after this point surface as an `Err` item in the stream.
    async fn speak(&self, text: &str) -> Result<AudioStream, String>;
}
