use crate::traits::{ByteStream, StorageError, StorageResult, StoredUpload, UploadStore};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

/// Local filesystem upload store
///
/// Files land at `{base_path}/{org_guid}/{filename}`. The incoming stream is
/// copied to disk chunk by chunk; the whole file is never held in memory.
#[derive(Clone)]
pub struct LocalUploadStore {
    base_path: PathBuf,
}

impl LocalUploadStore {
    /// Create a new LocalUploadStore rooted at `base_path`, creating the
    /// directory if it does not exist.
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalUploadStore { base_path })
    }

    /// Validate that a client-supplied filename cannot escape the storage
    /// directory. Path separators and `..` segments are rejected outright.
    fn validate_filename(filename: &str) -> StorageResult<()> {
        if filename.is_empty() {
            return Err(StorageError::InvalidKey("Empty filename".to_string()));
        }
        if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
            return Err(StorageError::InvalidKey(
                "Filename contains path traversal characters".to_string(),
            ));
        }
        Ok(())
    }

    fn generate_key(org_guid: Uuid, filename: &str) -> String {
        format!("{}/{}", org_guid, filename)
    }

    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl UploadStore for LocalUploadStore {
    async fn store(
        &self,
        org_guid: Uuid,
        filename: &str,
        data: ByteStream<'_>,
    ) -> StorageResult<StoredUpload> {
        Self::validate_filename(filename)?;

        let key = Self::generate_key(org_guid, filename);
        let path = self.base_path.join(&key);
        let start = std::time::Instant::now();

        self.ensure_parent_dir(&path).await?;

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        let mut reader = tokio_util::io::StreamReader::new(data);
        let size_bytes = tokio::io::copy(&mut reader, &mut file).await.map_err(|e| {
            StorageError::UploadFailed(format!(
                "Failed to write stream to file {}: {}",
                path.display(),
                e
            ))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            key = %key,
            size_bytes = size_bytes,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local store upload successful"
        );

        Ok(StoredUpload { key, size_bytes })
    }
}
