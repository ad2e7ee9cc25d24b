//! Stillcut Processing Library
//!
//! Raster work for the render pipeline:
//! - JPEG decode/encode and upload probing (codec)
//! - Crop box resolution, cropping and proportional scaling (image::crop)
//! - Bitmap-font label compositing (image::label)
//!
//! Everything here is synchronous and CPU-bound; async callers should run it
//! on a blocking thread.

pub mod codec;
pub mod error;
pub mod image;

pub use codec::JpegCodec;
pub use error::{CropError, ProcessingError};
pub use self::image::{CropBox, CropRequest, CropScale, LabelColor, LabelConfig, LabelOverlay, ScaleSpec};

/// In-memory raster every stage works on. Always RGBA so the label overlay can
/// write pixels directly and cropping never needs a capability check.
pub type Raster = ::image::RgbaImage;
