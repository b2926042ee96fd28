use lingua::{Language, LanguageDetector, LanguageDetectorBuilder};
use serde::{Deserialize, Serialize};

const SUPPORTED_LANGUAGES: [Language; 6] = [
    Language::English,
    Language::Spanish,
    Language::French,
    Language::German,
    Language::Italian,
    Language::Portuguese,
];

/// ISO 639-1 language codes the speech providers have voices for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LanguageCode {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "it")]
    Italian,
    #[serde(rename = "pt")]
    Portuguese,
}

impl LanguageCode {
    /// Get the ISO 639-1 code as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::English => "en",
            LanguageCode::Spanish => "es",
            LanguageCode::French => "fr",
            LanguageCode::German => "de",
            LanguageCode::Italian => "it",
            LanguageCode::Portuguese => "pt",
        }
    }

    /// Convert lingua Language to LanguageCode
    pub fn from_lingua(language: Language) -> Self {
        match language {
            Language::English => LanguageCode::English,
            Language::Spanish => LanguageCode::Spanish,
            Language::French => LanguageCode::French,
            Language::German => LanguageCode::German,
            Language::Italian => LanguageCode::Italian,
            Language::Portuguese => LanguageCode::Portuguese,
        }
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Detects the language of translated text so a matching voice can be picked.
///
/// Building a lingua detector is expensive, so speech repositories build one
/// at startup and keep it.
pub struct SpeechLanguageDetector {
    detector: LanguageDetector,
    fallback: LanguageCode,
}

impl SpeechLanguageDetector {
    pub fn new(fallback: LanguageCode) -> Self {
        Self {
            detector: LanguageDetectorBuilder::from_languages(&SUPPORTED_LANGUAGES).build(),
            fallback,
        }
    }

    pub fn detect(&self, text: &str) -> LanguageCode {
        match self.detector.detect_language_of(text) {
            Some(language) => LanguageCode::from_lingua(language),
            None => {
                tracing::warn!(
                    fallback = %self.fallback,
                    "Could not detect language, using fallback voice language"
                );
                self.fallback
            }
        }
    }
}

impl Default for SpeechLanguageDetector {
    /// Translations target Spanish unless configured otherwise
    fn default() -> Self {
        Self::new(LanguageCode::Spanish)
    }
}
