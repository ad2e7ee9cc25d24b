//! Render pipeline
//!
//! `filename -> load(+mtime) -> decode -> resolve box -> crop/scale ->
//! label? -> encode`. Query values are parsed up front but a bad value is
//! only reported once the stored image has been found and decoded, so a
//! missing file is always a 404 regardless of the other parameters.

use chrono::{DateTime, Local, Utc};
use std::sync::Arc;
use stillcut_core::AppError;
use stillcut_processing::image::DEFAULT_LABEL_ANCHOR;
use stillcut_processing::{
    CropError, CropRequest, CropScale, JpegCodec, LabelColor, LabelConfig, LabelOverlay,
    ProcessingError, ScaleSpec,
};
use stillcut_storage::BlobStore;

use super::{storage_error, validate_filename};
use crate::utils::ip_extraction::ClientIdentity;

const LABEL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Raw `/scaled` query. Everything is a string so that parse failures can be
/// reported per field instead of as one opaque query rejection.
#[derive(Debug, Clone, Default)]
pub struct RenderParams {
    pub filename: Option<String>,
    pub x1: Option<String>,
    pub y1: Option<String>,
    pub x2: Option<String>,
    pub y2: Option<String>,
    pub w: Option<String>,
    pub nolabel: Option<String>,
    pub id: Option<String>,
    pub color: Option<String>,
}

impl RenderParams {
    /// Build from decoded query pairs. A repeated key keeps its first value;
    /// unknown keys are ignored.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = RenderParams::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "filename" => &mut params.filename,
                "x1" => &mut params.x1,
                "y1" => &mut params.y1,
                "x2" => &mut params.x2,
                "y2" => &mut params.y2,
                "w" => &mut params.w,
                "nolabel" => &mut params.nolabel,
                "id" => &mut params.id,
                "color" => &mut params.color,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        params
    }

    fn crop_request(&self) -> Result<CropRequest, AppError> {
        Ok(CropRequest {
            x1: parse_u32_param("x1", self.x1.as_deref())?,
            y1: parse_u32_param("y1", self.y1.as_deref())?,
            x2: parse_u32_param("x2", self.x2.as_deref())?,
            y2: parse_u32_param("y2", self.y2.as_deref())?,
        })
    }

    fn scale_spec(&self) -> Result<ScaleSpec, AppError> {
        Ok(ScaleSpec {
            width: parse_u32_param("w", self.w.as_deref())?,
        })
    }

    fn label_config(&self) -> LabelConfig {
        LabelConfig {
            color: LabelColor::from_param(self.color.as_deref()),
            include_identity: is_flag_set(self.id.as_deref()),
            suppressed: is_flag_set(self.nolabel.as_deref()),
        }
    }
}

#[derive(Clone)]
pub struct RenderPipeline {
    store: Arc<dyn BlobStore>,
}

impl RenderPipeline {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    /// Produce the derivative JPEG for `params`.
    pub async fn render(
        &self,
        params: &RenderParams,
        identity: &ClientIdentity,
    ) -> Result<Vec<u8>, AppError> {
        let filename = validate_filename(params.filename.as_deref())?;
        let blob = self.store.read(filename).await.map_err(storage_error)?;

        let crop_request = params.crop_request();
        let scale = params.scale_spec();
        let label = params.label_config();
        let label_text = (!label.suppressed).then(|| {
            build_label_text(
                blob.modified,
                Utc::now(),
                label.include_identity.then_some(identity),
            )
        });

        tokio::task::spawn_blocking(move || -> Result<Vec<u8>, AppError> {
            let source = JpegCodec::decode(&blob.data).map_err(processing_error)?;
            let (width, height) = source.dimensions();

            let crop = crop_request?.resolve(width, height).map_err(crop_error)?;
            let mut raster = CropScale::apply(&source, crop, scale?).map_err(crop_error)?;

            if let Some(text) = label_text {
                LabelOverlay::draw(&mut raster, &text, DEFAULT_LABEL_ANCHOR, label.color);
            }

            JpegCodec::encode(&raster).map_err(processing_error)
        })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to spawn blocking task");
            AppError::Internal(e.to_string())
        })?
    }
}

/// `FileTime: <mtime> CurrentTime: <now>[ IP: <ip> User-Agent: <ua>]`, local time.
pub fn build_label_text(
    file_time: DateTime<Utc>,
    now: DateTime<Utc>,
    identity: Option<&ClientIdentity>,
) -> String {
    let mut text = format!(
        "FileTime: {} CurrentTime: {}",
        file_time.with_timezone(&Local).format(LABEL_TIME_FORMAT),
        now.with_timezone(&Local).format(LABEL_TIME_FORMAT),
    );
    if let Some(identity) = identity {
        text.push_str(&format!(
            " IP: {} User-Agent: {}",
            identity.ip, identity.user_agent
        ));
    }
    text
}

/// Absent or empty means "not given".
fn parse_u32_param(field: &'static str, value: Option<&str>) -> Result<Option<u32>, AppError> {
    match value.filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => v
            .parse::<u32>()
            .map(Some)
            .map_err(|e| AppError::invalid_parameter(field, format!("{:?}: {}", v, e))),
    }
}

fn is_flag_set(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

fn crop_error(err: CropError) -> AppError {
    AppError::invalid_parameter(err.field(), err.to_string())
}

fn processing_error(err: ProcessingError) -> AppError {
    match err {
        ProcessingError::Decode(msg) => AppError::Decode(msg),
        ProcessingError::Encode(msg) => AppError::Encode(msg),
    }
}
