use crate::e2e::helpers::TestContext;

use lingocast_backend::domain::resolution::{
    speech_key, translation_key, ResolveError, ResolverServiceApi,
};
use pretty_assertions::assert_eq;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_translate_synthesize_and_store_on_miss(ctx: &mut TestContext) {
    let resolver = ctx.resolver();

    let resolution = resolver.resolve("Hello World!").await.unwrap();

    assert_eq!(resolution.translation, "¡Hola Mundo!");
    assert_eq!(resolution.speech_url, "memory://speech/0");
    assert_eq!(
        ctx.storage.object(&resolution.speech_url),
        Some("¡Hola Mundo!".as_bytes().to_vec())
    );
    assert_eq!(
        ctx.log.calls(),
        vec![
            "cache.get translation_Hello World!",
            "translate Hello World!",
            "speak ¡Hola Mundo!",
            "store",
            "cache.set translation_Hello World!",
            "cache.set speech_¡Hola Mundo!",
        ]
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_pair_speech_entry_with_translation(ctx: &mut TestContext) {
    let resolver = ctx.resolver();

    let resolution = resolver.resolve("How are you?").await.unwrap();

    assert_eq!(ctx.cache.len(), 2);
    assert_eq!(
        ctx.cache.entry(&translation_key("How are you?")),
        Some(resolution.translation.clone())
    );
    assert_eq!(
        ctx.cache.entry(&speech_key(&resolution.translation)),
        Some(resolution.speech_url)
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_short_circuit_repeated_text(ctx: &mut TestContext) {
    let resolver = ctx.resolver();

    let first = resolver.resolve("How are you?").await.unwrap();
    ctx.log.clear();
    let second = resolver.resolve("How are you?").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(
        ctx.log.calls(),
        vec![
            "cache.get translation_How are you?",
            "cache.get speech_¿Cómo estás?",
        ]
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_stay_stable_across_many_resolutions(ctx: &mut TestContext) {
    let resolver = ctx.resolver();

    let first = resolver.resolve("Vaccination certificate").await.unwrap();
    for _ in 0..5 {
        assert_eq!(resolver.resolve("Vaccination certificate").await.unwrap(), first);
    }

    assert_eq!(ctx.log.count("translate"), 1);
    assert_eq!(ctx.log.count("speak"), 1);
    assert_eq!(ctx.log.count("store"), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_keep_untranslated_text_apart_from_speech_entries(ctx: &mut TestContext) {
    let resolver = ctx.resolver();

    // No translation known: the translator echoes the text
    let resolution = resolver.resolve("speech_hello").await.unwrap();
    assert_eq!(resolution.translation, "speech_hello");

    // "hello" translates to itself too, and must not pick up the entry above
    let other = resolver.resolve("hello").await.unwrap();
    assert_eq!(other.translation, "hello");
    assert_ne!(other.speech_url, resolution.speech_url);
    assert_eq!(ctx.log.count("translate"), 2);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_resynthesize_when_speech_entry_is_missing(ctx: &mut TestContext) {
    let resolver = ctx.resolver();

    let first = resolver.resolve("Hello World!").await.unwrap();
    ctx.cache.remove(&speech_key(&first.translation));
    ctx.log.clear();

    let second = resolver.resolve("Hello World!").await.unwrap();

    assert_eq!(second.translation, first.translation);
    assert_ne!(second.speech_url, first.speech_url);
    assert_eq!(ctx.log.count("translate"), 0);
    assert_eq!(ctx.log.count("speak"), 1);
    assert_eq!(
        ctx.cache.entry(&speech_key(&second.translation)),
        Some(second.speech_url)
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_propagate_translation_failure_without_caching(ctx: &mut TestContext) {
    ctx.translator.failing.lock().insert("Hello World!".to_string());
    let resolver = ctx.resolver();

    let err = resolver.resolve("Hello World!").await.unwrap_err();

    assert!(matches!(err, ResolveError::Translation(_)));
    assert_eq!(ctx.log.count("speak"), 0);
    assert_eq!(ctx.cache.len(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_propagate_rejected_speech(ctx: &mut TestContext) {
    ctx.speaker.rejecting.lock().insert("¡Hola Mundo!".to_string());
    let resolver = ctx.resolver();

    let err = resolver.resolve("Hello World!").await.unwrap_err();

    assert!(matches!(err, ResolveError::SpeechSynthesis(_)));
    assert_eq!(ctx.log.count("store"), 0);
    assert_eq!(ctx.cache.len(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_interrupted_audio_as_speech_failure(ctx: &mut TestContext) {
    ctx.speaker.breaking.lock().insert("¡Hola Mundo!".to_string());
    let resolver = ctx.resolver();

    let err = resolver.resolve("Hello World!").await.unwrap_err();

    assert!(matches!(err, ResolveError::SpeechSynthesis(msg) if msg == "stream reset"));
    assert_eq!(ctx.cache.len(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_propagate_storage_failure(ctx: &mut TestContext) {
    *ctx.storage.fail.lock() = true;
    let resolver = ctx.resolver();

    let err = resolver.resolve("Hello World!").await.unwrap_err();

    assert!(matches!(err, ResolveError::Storage(_)));
    assert_eq!(ctx.cache.len(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_propagate_cache_failure(ctx: &mut TestContext) {
    *ctx.cache.fail.lock() = true;
    let resolver = ctx.resolver();

    let err = resolver.resolve("Hello World!").await.unwrap_err();

    assert!(matches!(err, ResolveError::CacheUnavailable(_)));
    assert_eq!(ctx.log.count("translate"), 0);
}
