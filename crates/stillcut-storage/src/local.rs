use crate::traits::{BlobStore, StorageError, StorageResult, StoredBlob};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::io::ErrorKind;
use std::path::PathBuf;
use stillcut_core::is_valid_filename;
use tokio::fs;
use tokio::io::AsyncWriteExt;

const BLOB_EXTENSION: &str = "jpg";

/// Local filesystem blob store: one flat directory of `<key>.jpg` files
#[derive(Clone, Debug)]
pub struct LocalBlobStore {
    base_path: PathBuf,
}

impl LocalBlobStore {
    /// Create a new LocalBlobStore, creating `base_path` if needed
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalBlobStore { base_path })
    }

    /// Convert a key to its file path.
    ///
    /// Callers validate filenames before they get here; the store checks again
    /// so a bad key can never address anything outside `base_path`.
    fn key_to_path(&self, key: &str) -> StorageResult<PathBuf> {
        if !is_valid_filename(key) {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        Ok(self
            .base_path
            .join(format!("{}.{}", key, BLOB_EXTENSION)))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn read(&self, key: &str) -> StorageResult<StoredBlob> {
        let path = self.key_to_path(key)?;
        let start = std::time::Instant::now();

        let mut file = match fs::File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StorageError::NotFound(key.to_string()));
            }
            Err(e) => {
                return Err(StorageError::ReadFailed(format!(
                    "Failed to open file {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        let modified = file
            .metadata()
            .await
            .and_then(|meta| meta.modified())
            .map(DateTime::<Utc>::from)
            .map_err(|e| {
                StorageError::StatFailed(format!("Failed to stat file {}: {}", path.display(), e))
            })?;

        let mut data = Vec::new();
        tokio::io::AsyncReadExt::read_to_end(&mut file, &mut data)
            .await
            .map_err(|e| {
                StorageError::ReadFailed(format!("Failed to read file {}: {}", path.display(), e))
            })?;

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local blob read successful"
        );

        Ok(StoredBlob { data, modified })
    }

    async fn write(&self, key: &str, data: &[u8]) -> StorageResult<()> {
        let path = self.key_to_path(key)?;
        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(data).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local blob write successful"
        );

        Ok(())
    }

    async fn check(&self) -> StorageResult<()> {
        let meta = fs::metadata(&self.base_path).await?;
        if !meta.is_dir() {
            return Err(StorageError::ConfigError(format!(
                "{} is not a directory",
                self.base_path.display()
            )));
        }
        Ok(())
    }
}
