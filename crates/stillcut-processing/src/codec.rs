//! JPEG codec
//!
//! Decoding always produces an RGBA raster regardless of the file's native
//! pixel layout. Encoding uses the encoder's default quality.

use crate::error::ProcessingError;
use crate::Raster;
use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, Rgb, RgbImage};

pub struct JpegCodec;

impl JpegCodec {
    /// Decode JPEG bytes into an RGBA raster
    pub fn decode(data: &[u8]) -> Result<Raster, ProcessingError> {
        let img = image::load_from_memory_with_format(data, ImageFormat::Jpeg)
            .map_err(|e| ProcessingError::Decode(e.to_string()))?;
        Ok(img.to_rgba8())
    }

    /// Encode a raster as JPEG. Alpha is dropped; JPEG has no alpha channel.
    pub fn encode(raster: &Raster) -> Result<Vec<u8>, ProcessingError> {
        let (width, height) = raster.dimensions();
        let rgb = RgbImage::from_fn(width, height, |x, y| {
            let p = raster.get_pixel(x, y);
            Rgb([p[0], p[1], p[2]])
        });

        let mut buffer = Vec::with_capacity((width * height) as usize / 4);
        JpegEncoder::new(&mut buffer)
            .encode_image(&rgb)
            .map_err(|e| ProcessingError::Encode(e.to_string()))?;

        Ok(buffer)
    }

    /// Decode-and-discard probe used to vet uploads
    pub fn is_valid_jpeg(data: &[u8]) -> bool {
        image::load_from_memory_with_format(data, ImageFormat::Jpeg).is_ok()
    }
}
