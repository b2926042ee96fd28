use crate::domain::batch::BatchFailurePolicy;
use crate::error::AppError;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub log_format: LogFormat,
    // Translation
    pub translation_provider: TranslationProvider,
    pub translation_dictionary: Option<String>,
    pub target_language: String,
    pub openai_translation_model: String,
    // Speech
    pub speech_provider: SpeechProvider,
    pub openai_tts_model: String,
    pub openai_tts_voice: String,
    pub aws_region: String,
    // Storage
    pub storage_dir: String,
    pub storage_base_url: String,
    // Cache
    pub cache_max_capacity: u64,
    // Batches
    pub batch_failure_policy: BatchFailurePolicy,
    pub requests_file: Option<String>,
    pub response_sink: ResponseSinkKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationProvider {
    OpenAi,
    Dictionary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechProvider {
    Polly,
    OpenAi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSinkKind {
    Stdout,
    Log,
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(Environment::Development),
            "production" => Ok(Environment::Production),
            other => Err(format!("unknown environment: {}", other)),
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format: {}", other)),
        }
    }
}

impl FromStr for TranslationProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(TranslationProvider::OpenAi),
            "dictionary" => Ok(TranslationProvider::Dictionary),
            other => Err(format!("unknown translation provider: {}", other)),
        }
    }
}

impl FromStr for SpeechProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "polly" => Ok(SpeechProvider::Polly),
            "openai" => Ok(SpeechProvider::OpenAi),
            other => Err(format!("unknown speech provider: {}", other)),
        }
    }
}

impl FromStr for ResponseSinkKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stdout" => Ok(ResponseSinkKind::Stdout),
            "log" => Ok(ResponseSinkKind::Log),
            other => Err(format!("unknown response sink: {}", other)),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let config = Config {
            environment: parse_var("ENVIRONMENT", &or_default("ENVIRONMENT", "development"))?,
            log_format: parse_var("LOG_FORMAT", &or_default("LOG_FORMAT", "pretty"))?,
            translation_provider: parse_var(
                "TRANSLATION_PROVIDER",
                &or_default("TRANSLATION_PROVIDER", "dictionary"),
            )?,
            translation_dictionary: lookup("TRANSLATION_DICTIONARY"),
            target_language: or_default("TARGET_LANGUAGE", "Spanish"),
            openai_translation_model: or_default("OPENAI_TRANSLATION_MODEL", "gpt-4o-mini"),
            speech_provider: parse_var("SPEECH_PROVIDER", &or_default("SPEECH_PROVIDER", "polly"))?,
            openai_tts_model: or_default("OPENAI_TTS_MODEL", "tts-1"),
            openai_tts_voice: or_default("OPENAI_TTS_VOICE", ""),
            aws_region: or_default("AWS_REGION", "eu-west-1"),
            storage_dir: or_default("STORAGE_DIR", "./speech"),
            storage_base_url: or_default("STORAGE_BASE_URL", "http://localhost:8080/speech"),
            cache_max_capacity: parse_var(
                "CACHE_MAX_CAPACITY",
                &or_default("CACHE_MAX_CAPACITY", "10000"),
            )?,
            batch_failure_policy: parse_var(
                "BATCH_FAILURE_POLICY",
                &or_default("BATCH_FAILURE_POLICY", "halt"),
            )?,
            requests_file: lookup("REQUESTS_FILE"),
            response_sink: parse_var("RESPONSE_SINK", &or_default("RESPONSE_SINK", "stdout"))?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    fn validate(&self) -> Result<(), AppError> {
        if !self.is_development() && self.requests_file.is_none() {
            return Err(AppError::Config(
                "REQUESTS_FILE is required in production".to_string(),
            ));
        }
        if self.cache_max_capacity == 0 {
            return Err(AppError::Config(
                "CACHE_MAX_CAPACITY must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| AppError::Config(format!("{}: {}", key, e)))
}
