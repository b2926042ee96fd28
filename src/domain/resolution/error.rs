#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("cache unavailable: {0}")]
    CacheUnavailable(String),
    #[error("translation failed: {0}")]
    Translation(String),
    #[error("speech synthesis failed: {0}")]
    SpeechSynthesis(String),
    #[error("storage error: {0}")]
    Storage(String),
}
