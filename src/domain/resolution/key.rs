/// Key spaces of the resolution cache.
///
/// Translations are keyed by the source text, speech URLs by the translated
/// text. A translator may hand back its input unchanged, so both spaces can
/// see the same string and must never share a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheNamespace {
    Translation,
    Speech,
}

impl CacheNamespace {
    /// Prefixes start with different characters, so no key of one namespace
    /// is a prefix-extension of a key in the other.
    pub fn prefix(&self) -> &'static str {
        match self {
            CacheNamespace::Translation => "translation",
            CacheNamespace::Speech => "speech",
        }
    }
}

impl std::fmt::Display for CacheNamespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

pub fn cache_key(namespace: CacheNamespace, text: &str) -> String {
    format!("{}_{}", namespace.prefix(), text)
}

pub fn translation_key(text: &str) -> String {
    cache_key(CacheNamespace::Translation, text)
}

pub fn speech_key(translated_text: &str) -> String {
    cache_key(CacheNamespace::Speech, translated_text)
}
