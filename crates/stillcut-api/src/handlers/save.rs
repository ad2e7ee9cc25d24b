//! `POST /save`: authenticated JPEG upload

use axum::{
    extract::{
        multipart::MultipartRejection, rejection::QueryRejection, Multipart, Query, State,
    },
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use stillcut_core::AppError;

use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::ip_extraction::ClientIdentity;

const IMAGE_FIELD: &str = "image";

#[derive(Debug, Deserialize)]
pub struct SaveParams {
    pub filename: Option<String>,
}

/// Auth is checked before anything else, including the filename, so an
/// unauthenticated caller learns nothing about what it sent.
#[tracing::instrument(skip_all)]
pub async fn save_image(
    State(state): State<Arc<AppState>>,
    identity: ClientIdentity,
    headers: HeaderMap,
    query: Result<Query<SaveParams>, QueryRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let pipeline = &state.upload;

    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    pipeline.authorize(authorization)?;

    let filename = query.ok().and_then(|Query(params)| params.filename);
    let filename = pipeline.check_filename(filename.as_deref())?;

    let mut multipart =
        multipart.map_err(|e| AppError::UnreadableUpload(e.body_text()))?;

    // The field borrows the form, so it is drained inside the loop.
    let data = loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some(IMAGE_FIELD) => {
                break pipeline.read_bounded(field).await?;
            }
            Ok(Some(_)) => continue,
            Ok(None) => {
                return Err(AppError::UnreadableUpload(format!(
                    "multipart body has no '{}' field",
                    IMAGE_FIELD
                ))
                .into())
            }
            Err(e) => return Err(AppError::UnreadableUpload(e.body_text()).into()),
        }
    };

    let size_bytes = data.len();
    pipeline.persist(filename, data).await?;

    tracing::info!(
        client_ip = %identity.ip,
        size_bytes,
        filename = %filename,
        "Image saved"
    );

    Ok(StatusCode::OK)
}

/// Any method other than POST on `/save`
pub async fn method_not_allowed() -> HttpAppError {
    HttpAppError(AppError::MethodNotAllowed)
}
