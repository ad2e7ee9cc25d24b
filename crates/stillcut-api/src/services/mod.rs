//! Upload and render pipelines
//!
//! Both are built once from `Config` and shared across requests. They hold no
//! per-request state; the blob store is the only shared mutable resource.

pub mod render;
pub mod upload;

pub use render::{RenderParams, RenderPipeline};
pub use upload::UploadPipeline;

use stillcut_core::AppError;
use stillcut_storage::StorageError;

/// Storage failures as seen by a client. Write and read failures are both 500.
pub(crate) fn storage_error(err: StorageError) -> AppError {
    match err {
        StorageError::NotFound(key) => AppError::NotFound(key),
        StorageError::InvalidKey(_) => AppError::InvalidFilename,
        StorageError::ReadFailed(msg)
        | StorageError::StatFailed(msg)
        | StorageError::WriteFailed(msg)
        | StorageError::ConfigError(msg) => AppError::Io(msg),
        StorageError::IoError(err) => AppError::Io(err.to_string()),
    }
}

/// Shared filename gate for both pipelines.
pub(crate) fn validate_filename(filename: Option<&str>) -> Result<&str, AppError> {
    match filename {
        Some(name) if stillcut_core::is_valid_filename(name) => Ok(name),
        _ => Err(AppError::InvalidFilename),
    }
}
