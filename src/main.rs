use anyhow::Context;
use lingocast_backend::domain::batch::{BatchService, BatchServiceApi};
use lingocast_backend::domain::resolution::ResolverService;
use lingocast_backend::domain::speech::SpeechLanguageDetector;
use lingocast_backend::error::{AppError, AppResult};
use lingocast_backend::infrastructure::config::{
    Config, LogFormat, ResponseSinkKind, SpeechProvider, TranslationProvider,
};
use lingocast_backend::infrastructure::repositories::{
    DictionaryTranslationRepository, FileRequestsRepository, FileStorageRepository,
    HardcodedRequestsRepository, MokaCacheRepository, OpenAiSpeechRepository,
    OpenAiTranslationRepository, PollySpeechRepository, RequestsRepository, SpeechRepository,
    TranslationRepository,
};
use lingocast_backend::infrastructure::sink::{JsonLinesSink, LogSink, ResponseSink};
use std::collections::HashMap;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        tracing::error!(error = %e, "Run failed");
        eprintln!("error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run() -> AppResult<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        environment = ?config.environment,
        translation_provider = ?config.translation_provider,
        speech_provider = ?config.speech_provider,
        "Starting LingoCast"
    );

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories
    tracing::info!("Instantiating repositories...");
    let cache_repo = Arc::new(MokaCacheRepository::new(config.cache_max_capacity));
    let translation_repo = build_translation_repository(&config).await?;
    let speech_repo = build_speech_repository(&config).await;
    tokio::fs::create_dir_all(&config.storage_dir)
        .await
        .with_context(|| format!("Failed to create storage directory {}", config.storage_dir))?;
    let storage_repo = Arc::new(FileStorageRepository::new(
        config.storage_dir.clone(),
        config.storage_base_url.clone(),
    ));
    let requests_repo: Arc<dyn RequestsRepository> = match &config.requests_file {
        Some(path) => Arc::new(FileRequestsRepository::new(path)),
        None => {
            tracing::info!("REQUESTS_FILE not set, using the built-in sample batches");
            Arc::new(HardcodedRequestsRepository::new())
        }
    };
    let sink: Arc<dyn ResponseSink> = match config.response_sink {
        ResponseSinkKind::Stdout => Arc::new(JsonLinesSink::new()),
        ResponseSinkKind::Log => Arc::new(LogSink::new()),
    };

    // 2. Instantiate services (inject repositories)
    tracing::info!("Instantiating services...");
    let resolver_service = Arc::new(ResolverService::new(
        cache_repo,
        translation_repo,
        speech_repo,
        storage_repo,
    ));
    let batch_service = BatchService::new(resolver_service, sink, config.batch_failure_policy);

    // 3. Process the batches in order
    let batches = requests_repo.load().await.map_err(AppError::Requests)?;
    let summary = batch_service.process_all(&batches).await?;

    tracing::info!(
        batches_emitted = summary.batches_emitted,
        batches_failed = summary.batches_failed,
        texts_resolved = summary.texts_resolved,
        "Run finished"
    );

    Ok(())
}

async fn build_translation_repository(config: &Config) -> AppResult<Arc<dyn TranslationRepository>> {
    match config.translation_provider {
        TranslationProvider::OpenAi => {
            tracing::info!(
                model = %config.openai_translation_model,
                target_language = %config.target_language,
                "Initializing OpenAI translation client"
            );
            Ok(Arc::new(OpenAiTranslationRepository::new(
                Arc::new(async_openai::Client::new()),
                config.openai_translation_model.clone(),
                config.target_language.clone(),
            )))
        }
        TranslationProvider::Dictionary => match &config.translation_dictionary {
            Some(path) => Ok(Arc::new(
                DictionaryTranslationRepository::from_file(path)
                    .await
                    .map_err(AppError::Config)?,
            )),
            None => {
                tracing::warn!("TRANSLATION_DICTIONARY not set, texts will pass through untranslated");
                Ok(Arc::new(DictionaryTranslationRepository::new(HashMap::new())))
            }
        },
    }
}

async fn build_speech_repository(config: &Config) -> Arc<dyn SpeechRepository> {
    let language_detector = SpeechLanguageDetector::default();

    match config.speech_provider {
        SpeechProvider::Polly => {
            tracing::info!("Initializing AWS Polly client with region: {}", config.aws_region);

            let has_access_key = std::env::var("AWS_ACCESS_KEY_ID").is_ok();
            let has_secret_key = std::env::var("AWS_SECRET_ACCESS_KEY").is_ok();
            if !has_access_key || !has_secret_key {
                tracing::warn!("AWS credentials not found in environment variables. Will attempt to use other credential providers (instance metadata, etc.)");
            }

            let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(aws_config::Region::new(config.aws_region.clone()))
                .load()
                .await;
            let polly_client = Arc::new(aws_sdk_polly::Client::new(&aws_config));

            Arc::new(PollySpeechRepository::new(polly_client, language_detector))
        }
        SpeechProvider::OpenAi => {
            tracing::info!(model = %config.openai_tts_model, "Initializing OpenAI TTS client");
            Arc::new(OpenAiSpeechRepository::new(
                Arc::new(async_openai::Client::new()),
                config.openai_tts_model.clone(),
                config.openai_tts_voice.clone(),
                language_detector,
            ))
        }
    }
}

fn init_logging(config: &Config) {
    // stdout carries the responses, logs go to stderr
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "lingocast_backend=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "lingocast_backend=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}
