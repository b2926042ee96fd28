pub mod language;

pub use language::{LanguageCode, SpeechLanguageDetector};
