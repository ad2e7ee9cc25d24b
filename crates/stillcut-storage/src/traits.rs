//! Blob store abstraction
//!
//! This module defines the `BlobStore` trait that the upload and render
//! pipelines talk to.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Stat failed: {0}")]
    StatFailed(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Stored bytes plus the last-modified time reported by the backend.
#[derive(Debug, Clone)]
pub struct StoredBlob {
    pub data: Vec<u8>,
    pub modified: DateTime<Utc>,
}

/// Storage abstraction trait
///
/// There is no per-key locking: a read racing a write to the same key may
/// observe a partially written file, and concurrent writes are last-writer-wins.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Read a blob and its modification time
    async fn read(&self, key: &str) -> StorageResult<StoredBlob>;

    /// Create or overwrite a blob
    async fn write(&self, key: &str, data: &[u8]) -> StorageResult<()>;

    /// Verify the backend is reachable and writable-looking (readiness probe)
    async fn check(&self) -> StorageResult<()>;
}
