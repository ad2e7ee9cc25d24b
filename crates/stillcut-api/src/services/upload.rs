//! Upload pipeline
//!
//! `authorize -> check_filename -> read_bounded -> persist` (persist validates
//! the JPEG before writing). Each stage short-circuits; nothing is written
//! until the bytes have decoded.

use bytes::Bytes;
use futures::{Stream, StreamExt};
use std::fmt::Display;
use std::sync::Arc;
use stillcut_core::{AppError, Config};
use stillcut_processing::JpegCodec;
use stillcut_storage::BlobStore;

use super::{storage_error, validate_filename};
use crate::auth::BearerAuth;

#[derive(Clone)]
pub struct UploadPipeline {
    store: Arc<dyn BlobStore>,
    auth: BearerAuth,
    max_upload_bytes: usize,
}

impl UploadPipeline {
    pub fn new(store: Arc<dyn BlobStore>, config: &Config) -> Self {
        Self {
            store,
            auth: BearerAuth::new(&config.bearer_token),
            max_upload_bytes: usize::try_from(config.max_upload_bytes).unwrap_or(usize::MAX),
        }
    }

    pub fn authorize(&self, authorization: Option<&str>) -> Result<(), AppError> {
        if self.auth.is_authorized(authorization) {
            Ok(())
        } else {
            Err(AppError::Unauthorized)
        }
    }

    pub fn check_filename<'a>(&self, filename: Option<&'a str>) -> Result<&'a str, AppError> {
        validate_filename(filename)
    }

    /// Collect at most `max_upload_bytes` from `body`.
    ///
    /// Anything past the cap is dropped unread; oversize is not an error of
    /// its own, the truncated bytes simply go on to JPEG validation.
    pub async fn read_bounded<S, E>(&self, body: S) -> Result<Vec<u8>, AppError>
    where
        S: Stream<Item = Result<Bytes, E>>,
        E: Display,
    {
        let limit = self.max_upload_bytes;
        let mut body = std::pin::pin!(body);
        let mut data = Vec::new();

        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|e| AppError::UnreadableUpload(e.to_string()))?;
            let remaining = limit - data.len();
            if chunk.len() >= remaining {
                data.extend_from_slice(&chunk[..remaining]);
                tracing::debug!(limit, "Upload reached size limit, ignoring the rest");
                break;
            }
            data.extend_from_slice(&chunk);
        }

        Ok(data)
    }

    /// Validate `data` as JPEG, then create or overwrite `filename`.
    pub async fn persist(&self, filename: &str, data: Vec<u8>) -> Result<(), AppError> {
        let (data, valid) = tokio::task::spawn_blocking(move || {
            let valid = JpegCodec::is_valid_jpeg(&data);
            (data, valid)
        })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to spawn blocking task");
            AppError::Internal(e.to_string())
        })?;

        if !valid {
            return Err(AppError::InvalidUpload(format!(
                "{} bytes for {} did not decode as JPEG",
                data.len(),
                filename
            )));
        }

        self.store
            .write(filename, &data)
            .await
            .map_err(storage_error)
    }
}
