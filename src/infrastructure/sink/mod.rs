use crate::domain::batch::BatchResponse;
use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

/// Delivery of finished batch responses.
///
/// Called once per batch, after every text of the batch resolved. Delivery is
/// fire-and-forget: sinks report their own problems and never fail the run.
#[async_trait]
pub trait ResponseSink: Send + Sync {
    async fn emit(&self, response: &BatchResponse);
}

/// Writes each response as one JSON line on stdout
pub struct JsonLinesSink;

impl JsonLinesSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonLinesSink {
    fn default() -> Self {
        Self::new()
    }
}

/// One response as a newline-terminated JSON object
fn json_line(response: &BatchResponse) -> Result<Vec<u8>, serde_json::Error> {
    let mut line = serde_json::to_vec(response)?;
    line.push(b'\n');
    Ok(line)
}

#[async_trait]
impl ResponseSink for JsonLinesSink {
    async fn emit(&self, response: &BatchResponse) {
        let line = match json_line(response) {
            Ok(line) => line,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize response");
                return;
            }
        };

        let mut stdout = tokio::io::stdout();
        if let Err(e) = stdout.write_all(&line).await {
            tracing::error!(error = %e, "Failed to write response");
            return;
        }
        if let Err(e) = stdout.flush().await {
            tracing::error!(error = %e, "Failed to flush response");
        }
    }
}

/// Emits each response as a tracing event
pub struct LogSink;

impl LogSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResponseSink for LogSink {
    async fn emit(&self, response: &BatchResponse) {
        tracing::info!(
            translations = ?response.translations,
            speech = ?response.speech,
            "Response emitted"
        );
    }
}
