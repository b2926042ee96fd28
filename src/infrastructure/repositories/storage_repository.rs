use super::speech_repository::AudioStream;
use async_trait::async_trait;
use chrono::Utc;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The audio stream failed before it ended
    #[error("audio stream interrupted: {0}")]
    AudioStream(String),
    #[error("write failed: {0}")]
    Write(String),
}

/// Repository that persists synthesized audio and hands out a URL for it
#[async_trait]
pub trait StorageRepository: Send + Sync {
    /// Consume `stream` to its end and return a stable, unique URL
    async fn store(&self, stream: AudioStream) -> Result<String, StorageError>;
}

/// Stores audio as MP3 files under a local directory served at `base_url`
pub struct FileStorageRepository {
    root: PathBuf,
    base_url: String,
}

impl FileStorageRepository {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn write_stream(&self, path: &Path, mut stream: AudioStream) -> Result<usize, StorageError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::Write(format!("{}: {}", parent.display(), e)))?;
        }

        let mut file = tokio::fs::File::create(path)
            .await
            .map_err(|e| StorageError::Write(format!("{}: {}", path.display(), e)))?;

        let mut written = 0;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(StorageError::AudioStream)?;
            file.write_all(&chunk)
                .await
                .map_err(|e| StorageError::Write(format!("{}: {}", path.display(), e)))?;
            written += chunk.len();
        }

        file.flush()
            .await
            .map_err(|e| StorageError::Write(format!("{}: {}", path.display(), e)))?;

        Ok(written)
    }
}

#[async_trait]
impl StorageRepository for FileStorageRepository {
    async fn store(&self, stream: AudioStream) -> Result<String, StorageError> {
        let object_key = format!(
            "{}/{}.mp3",
            Utc::now().format("%Y/%m/%d"),
            Uuid::new_v4()
        );
        let path = self.root.join(&object_key);

        match self.write_stream(&path, stream).await {
            Ok(size) => {
                let url = format!("{}/{}", self.base_url, object_key);
                tracing::info!(
                    path = %path.display(),
                    audio_size_bytes = size,
                    url = %url,
                    "Audio stored"
                );
                Ok(url)
            }
            Err(e) => {
                tracing::error!(error = %e, path = %path.display(), "Failed to store audio");
                if let Err(remove_err) = tokio::fs::remove_file(&path).await {
                    tracing::debug!(error = %remove_err, "No partial audio file to remove");
                }
                Err(e)
            }
        }
    }
}
