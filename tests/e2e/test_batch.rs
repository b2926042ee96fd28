use crate::e2e::helpers::TestContext;

use lingocast_backend::domain::batch::{
    BatchError, BatchFailurePolicy, BatchRequest, BatchResponse, BatchServiceApi,
};
use lingocast_backend::domain::resolution::ResolveError;
use lingocast_backend::infrastructure::repositories::{
    HardcodedRequestsRepository, RequestsRepository,
};
use pretty_assertions::assert_eq;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reuse_cached_speech_for_repeated_text_in_batch(ctx: &mut TestContext) {
    let service = ctx.batch_service(BatchFailurePolicy::Halt);
    let batch = BatchRequest::new(vec!["Hello World!", "How are you?", "How are you?"]);

    let response = service.process_batch(0, &batch).await.unwrap();

    assert_eq!(
        response,
        BatchResponse {
            translations: vec![
                "¡Hola Mundo!".to_string(),
                "¿Cómo estás?".to_string(),
                "¿Cómo estás?".to_string(),
            ],
            speech: vec![
                "memory://speech/0".to_string(),
                "memory://speech/1".to_string(),
                "memory://speech/1".to_string(),
            ],
        }
    );
    assert_eq!(ctx.log.count("translate"), 2);
    assert_eq!(ctx.log.count("speak"), 2);
    assert_eq!(ctx.log.count("store"), 2);
    assert_eq!(ctx.sink.responses(), vec![response]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_shared_text_of_later_batch_from_cache(ctx: &mut TestContext) {
    let service = ctx.batch_service(BatchFailurePolicy::Halt);

    let first = service
        .process_batch(0, &BatchRequest::new(vec!["How are you?"]))
        .await
        .unwrap();
    ctx.log.clear();
    let second = service
        .process_batch(1, &BatchRequest::new(vec!["How are you?"]))
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(ctx.log.count("translate"), 0);
    assert_eq!(ctx.log.count("speak"), 0);
    assert_eq!(ctx.log.count("store"), 0);
    assert_eq!(ctx.log.count("cache.set"), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_align_responses_with_requests_in_sample_run(ctx: &mut TestContext) {
    let service = ctx.batch_service(BatchFailurePolicy::Halt);
    let batches = HardcodedRequestsRepository::new().load().await.unwrap();

    let summary = service.process_all(&batches).await.unwrap();

    assert_eq!(summary.batches_emitted, 2);
    assert_eq!(summary.batches_failed, 0);
    assert_eq!(summary.texts_resolved, 10);

    let responses = ctx.sink.responses();
    assert_eq!(responses.len(), batches.len());
    for (batch, response) in batches.iter().zip(&responses) {
        assert_eq!(response.translations.len(), batch.texts.len());
        assert_eq!(response.speech.len(), batch.texts.len());
    }

    // Same text, same pair, wherever it appears
    assert_eq!(responses[0].translations[1], "¿Cómo estás?");
    assert_eq!(responses[0].speech[1], responses[0].speech[4]);
    assert_eq!(responses[0].speech[1], responses[1].speech[0]);
    assert_eq!(responses[0].speech[5], responses[1].speech[3]);

    // Untranslatable texts come back as they were
    assert_eq!(
        responses[0].translations[2],
        "Recognize the symptoms of COVID-19"
    );

    // Six distinct texts across both batches
    assert_eq!(ctx.log.count("translate"), 6);
    assert_eq!(ctx.log.count("speak"), 6);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_emit_empty_response_for_empty_batch(ctx: &mut TestContext) {
    let service = ctx.batch_service(BatchFailurePolicy::Halt);

    let response = service
        .process_batch(0, &BatchRequest::new(Vec::<String>::new()))
        .await
        .unwrap();

    assert!(response.is_empty());
    assert_eq!(ctx.sink.responses(), vec![BatchResponse::default()]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_not_emit_partial_response(ctx: &mut TestContext) {
    ctx.translator
        .failing
        .lock()
        .insert("Vaccination certificate".to_string());
    let service = ctx.batch_service(BatchFailurePolicy::Halt);
    let batch = BatchRequest::new(vec!["Hello World!", "Vaccination certificate", "How are you?"]);

    let err = service.process_batch(3, &batch).await.unwrap_err();

    match err {
        BatchError::Resolution {
            batch_index,
            text_index,
            source,
        } => {
            assert_eq!(batch_index, 3);
            assert_eq!(text_index, 1);
            assert!(matches!(source, ResolveError::Translation(_)));
        }
    }
    assert!(ctx.sink.responses().is_empty());
    // Resolution stopped at the failing text
    assert_eq!(ctx.log.count("translate How are you?"), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_halt_remaining_batches_on_failure(ctx: &mut TestContext) {
    ctx.speaker.rejecting.lock().insert("¿Cómo estás?".to_string());
    let service = ctx.batch_service(BatchFailurePolicy::Halt);
    let batches = vec![
        BatchRequest::new(vec!["Hello World!"]),
        BatchRequest::new(vec!["How are you?"]),
        BatchRequest::new(vec!["Vaccination certificate"]),
    ];

    let err = service.process_all(&batches).await.unwrap_err();

    assert!(matches!(err, BatchError::Resolution { batch_index: 1, .. }));
    assert_eq!(ctx.sink.responses().len(), 1);
    assert_eq!(ctx.log.count("translate Vaccination certificate"), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_skip_failed_batch_when_configured(ctx: &mut TestContext) {
    ctx.speaker.rejecting.lock().insert("¿Cómo estás?".to_string());
    let service = ctx.batch_service(BatchFailurePolicy::Skip);
    let batches = vec![
        BatchRequest::new(vec!["Hello World!"]),
        BatchRequest::new(vec!["How are you?"]),
        BatchRequest::new(vec!["Vaccination certificate"]),
    ];

    let summary = service.process_all(&batches).await.unwrap();

    assert_eq!(summary.batches_emitted, 2);
    assert_eq!(summary.batches_failed, 1);
    assert_eq!(summary.texts_resolved, 2);

    let responses = ctx.sink.responses();
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0].translations, vec!["¡Hola Mundo!"]);
    assert_eq!(responses[1].translations, vec!["Certificado de vacunación"]);
}
