pub mod cache_repository;
pub mod dictionary_translation_repository;
pub mod openai_speech_repository;
pub mod openai_translation_repository;
pub mod polly_speech_repository;
pub mod requests_repository;
pub mod speech_repository;
pub mod storage_repository;
pub mod text_splitter;
pub mod translation_repository;

pub use cache_repository::{CacheRepository, MokaCacheRepository};
pub use dictionary_translation_repository::DictionaryTranslationRepository;
pub use openai_speech_repository::OpenAiSpeechRepository;
pub use openai_translation_repository::OpenAiTranslationRepository;
pub use polly_speech_repository::PollySpeechRepository;
pub use requests_repository::{FileRequestsRepository, HardcodedRequestsRepository, RequestsRepository};
pub use speech_repository::{AudioStream, SpeechRepository};
pub use storage_repository::{FileStorageRepository, StorageError, StorageRepository};
pub use translation_repository::TranslationRepository;
