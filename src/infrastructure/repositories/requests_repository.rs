use crate::domain::batch::BatchRequest;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::LazyLock;

/// Source of the request batches to process, in arrival order
#[async_trait]
pub trait RequestsRepository: Send + Sync {
    async fn load(&self) -> Result<Vec<BatchRequest>, String>;
}

static SAMPLE_REQUESTS: LazyLock<Vec<BatchRequest>> = LazyLock::new(|| {
    vec![
        BatchRequest::new(vec![
            "Hello World!",
            "How are you?",
            "Recognize the symptoms of COVID-19",
            "Postponement of booster vaccination periods",
            "How are you?",
            "Vaccination certificate",
        ]),
        BatchRequest::new(vec![
            "How are you?",
            "People 33-64 years of age",
            "How are you?",
            "Vaccination certificate",
        ]),
    ]
});

/// Two sample batches that share phrases, used when no requests file is set
pub struct HardcodedRequestsRepository;

impl HardcodedRequestsRepository {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HardcodedRequestsRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RequestsRepository for HardcodedRequestsRepository {
    async fn load(&self) -> Result<Vec<BatchRequest>, String> {
        Ok(SAMPLE_REQUESTS.clone())
    }
}

/// Reads batches from a JSON file holding an array of string arrays
pub struct FileRequestsRepository {
    path: PathBuf,
}

impl FileRequestsRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RequestsRepository for FileRequestsRepository {
    async fn load(&self) -> Result<Vec<BatchRequest>, String> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| format!("Failed to read {}: {}", self.path.display(), e))?;
        let batches: Vec<Vec<String>> = serde_json::from_str(&raw)
            .map_err(|e| format!("Invalid requests file {}: {}", self.path.display(), e))?;

        tracing::info!(
            path = %self.path.display(),
            batch_count = batches.len(),
            "Request batches loaded"
        );

        Ok(batches.into_iter().map(BatchRequest::new).collect())
    }
}
