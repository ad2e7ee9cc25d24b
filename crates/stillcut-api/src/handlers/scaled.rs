//! `GET /scaled`: crop, scale and label a stored image

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::IntoResponse,
};
use std::sync::Arc;
use stillcut_core::AppError;

use crate::error::HttpAppError;
use crate::services::RenderParams;
use crate::state::AppState;
use crate::utils::ip_extraction::ClientIdentity;

#[tracing::instrument(skip_all)]
pub async fn scaled_image(
    State(state): State<Arc<AppState>>,
    identity: ClientIdentity,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let Query(pairs) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let params = RenderParams::from_pairs(pairs);

    let jpeg = state.render.render(&params, &identity).await?;

    tracing::debug!(
        filename = params.filename.as_deref().unwrap_or_default(),
        size_bytes = jpeg.len(),
        "Rendered image"
    );

    Ok(([(header::CONTENT_TYPE, "image/jpeg")], jpeg))
}
