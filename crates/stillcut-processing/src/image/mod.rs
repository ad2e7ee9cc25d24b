//! Image transforms
//!
//! - Crop box resolution, cropping and Lanczos scaling (crop)
//! - Text label compositing (label)

pub mod crop;
pub mod label;

pub use crop::{CropBox, CropRequest, CropScale, ScaleSpec, MAX_SCALED_DIMENSION};
pub use label::{LabelColor, LabelConfig, LabelOverlay, DEFAULT_LABEL_ANCHOR};
