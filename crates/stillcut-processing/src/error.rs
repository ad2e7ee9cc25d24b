use thiserror::Error;

/// Codec failures
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("Failed to decode JPEG: {0}")]
    Decode(String),

    #[error("Failed to encode JPEG: {0}")]
    Encode(String),
}

/// Crop box and scale failures. `field` is the query parameter to blame.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CropError {
    #[error("{field}={value} exceeds image bound {limit}")]
    OutOfBounds {
        field: &'static str,
        value: u32,
        limit: u32,
    },

    #[error("{field}={value} must be less than {other}")]
    EmptyRegion {
        field: &'static str,
        value: u32,
        other: u32,
    },

    #[error("scale width must be greater than zero")]
    ZeroScaleWidth,

    #[error("scaled size {width}x{height} exceeds {limit} pixels per side")]
    ScaleTooLarge { width: u32, height: u64, limit: u32 },
}

impl CropError {
    pub fn field(&self) -> &'static str {
        match self {
            CropError::OutOfBounds { field, .. } | CropError::EmptyRegion { field, .. } => field,
            CropError::ZeroScaleWidth | CropError::ScaleTooLarge { .. } => "w",
        }
    }
}
