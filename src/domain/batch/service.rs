use super::error::BatchError;
use super::{BatchFailurePolicy, BatchRequest, BatchResponse, BatchRunSummary};
use crate::domain::resolution::ResolverServiceApi;
use crate::infrastructure::sink::ResponseSink;
use async_trait::async_trait;
use std::sync::Arc;

pub struct BatchService {
    resolver: Arc<dyn ResolverServiceApi>,
    sink: Arc<dyn ResponseSink>,
    failure_policy: BatchFailurePolicy,
}

impl BatchService {
    pub fn new(
        resolver: Arc<dyn ResolverServiceApi>,
        sink: Arc<dyn ResponseSink>,
        failure_policy: BatchFailurePolicy,
    ) -> Self {
        Self {
            resolver,
            sink,
            failure_policy,
        }
    }
}

#[async_trait]
pub trait BatchServiceApi: Send + Sync {
    /// Resolve every text of `batch` in order and emit the response.
    ///
    /// Nothing is emitted for a batch that fails partway.
    async fn process_batch(
        &self,
        batch_index: usize,
        batch: &BatchRequest,
    ) -> Result<BatchResponse, BatchError>;

    /// Process `batches` one after another, applying the failure policy
    async fn process_all(&self, batches: &[BatchRequest]) -> Result<BatchRunSummary, BatchError>;
}

#[async_trait]
impl BatchServiceApi for BatchService {
    async fn process_batch(
        &self,
        batch_index: usize,
        batch: &BatchRequest,
    ) -> Result<BatchResponse, BatchError> {
        let start_time = std::time::Instant::now();

        tracing::info!(
            batch_index,
            text_count = batch.texts.len(),
            "Processing batch"
        );

        let mut response = BatchResponse {
            translations: Vec::with_capacity(batch.texts.len()),
            speech: Vec::with_capacity(batch.texts.len()),
        };

        for (text_index, text) in batch.texts.iter().enumerate() {
            let resolution =
                self.resolver
                    .resolve(text)
                    .await
                    .map_err(|source| BatchError::Resolution {
                        batch_index,
                        text_index,
                        source,
                    })?;

            response.translations.push(resolution.translation);
            response.speech.push(resolution.speech_url);
        }

        self.sink.emit(&response).await;

        tracing::info!(
            batch_index,
            text_count = response.len(),
            latency_ms = start_time.elapsed().as_millis(),
            "Batch response emitted"
        );

        Ok(response)
    }

    async fn process_all(&self, batches: &[BatchRequest]) -> Result<BatchRunSummary, BatchError> {
        let mut summary = BatchRunSummary::default();

        for (batch_index, batch) in batches.iter().enumerate() {
            match self.process_batch(batch_index, batch).await {
                Ok(response) => {
                    summary.batches_emitted += 1;
                    summary.texts_resolved += response.len();
                }
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        batch_index,
                        policy = ?self.failure_policy,
                        "Batch failed"
                    );
                    match self.failure_policy {
                        BatchFailurePolicy::Halt => return Err(e),
                        BatchFailurePolicy::Skip => summary.batches_failed += 1,
                    }
                }
            }
        }

        tracing::info!(
            batches_emitted = summary.batches_emitted,
            batches_failed = summary.batches_failed,
            texts_resolved = summary.texts_resolved,
            "All batches processed"
        );

        Ok(summary)
    }
}
