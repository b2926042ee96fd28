pub mod error;
pub mod service;

pub use error::BatchError;
use serde::{Deserialize, Serialize};
pub use service::{BatchService, BatchServiceApi};

/// Ordered source texts received together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRequest {
    pub texts: Vec<String>,
}

impl BatchRequest {
    pub fn new<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            texts: texts.into_iter().map(Into::into).collect(),
        }
    }
}

/// Response for one batch; `translations[i]` and `speech[i]` belong to the
/// i-th text of the request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResponse {
    pub translations: Vec<String>,
    pub speech: Vec<String>,
}

impl BatchResponse {
    pub fn len(&self) -> usize {
        self.translations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }
}

/// What to do with the remaining batches after one fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BatchFailurePolicy {
    /// Stop and report the failure
    #[default]
    Halt,
    /// Log the failure and continue with the next batch
    Skip,
}

impl std::str::FromStr for BatchFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "halt" => Ok(BatchFailurePolicy::Halt),
            "skip" => Ok(BatchFailurePolicy::Skip),
            other => Err(format!("unknown batch failure policy: {}", other)),
        }
    }
}

/// Outcome of processing a sequence of batches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchRunSummary {
    pub batches_emitted: usize,
    pub batches_failed: usize,
    pub texts_resolved: usize,
}
