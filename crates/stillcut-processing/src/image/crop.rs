//! Crop and proportional scale
//!
//! The crop box is given in source pixel space as `(x1, y1)–(x2, y2)` with
//! exclusive upper corners. Boxes that leave the image or have no area are
//! rejected, never clamped.

use crate::error::CropError;
use crate::Raster;
use image::imageops::{self, FilterType};

/// Crop corners as requested; `None` means "use the image bound".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CropRequest {
    pub x1: Option<u32>,
    pub y1: Option<u32>,
    pub x2: Option<u32>,
    pub y2: Option<u32>,
}

impl CropRequest {
    /// Fill in defaults from the image bounds and check the result lies inside them.
    pub fn resolve(self, width: u32, height: u32) -> Result<CropBox, CropError> {
        let crop = CropBox {
            x1: self.x1.unwrap_or(0),
            y1: self.y1.unwrap_or(0),
            x2: self.x2.unwrap_or(width),
            y2: self.y2.unwrap_or(height),
        };
        crop.check_within(width, height)?;
        Ok(crop)
    }
}

/// A resolved crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropBox {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl CropBox {
    pub fn full(width: u32, height: u32) -> Self {
        CropBox {
            x1: 0,
            y1: 0,
            x2: width,
            y2: height,
        }
    }

    pub fn width(&self) -> u32 {
        self.x2.saturating_sub(self.x1)
    }

    pub fn height(&self) -> u32 {
        self.y2.saturating_sub(self.y1)
    }

    fn check_within(&self, width: u32, height: u32) -> Result<(), CropError> {
        if self.x2 > width {
            return Err(CropError::OutOfBounds {
                field: "x2",
                value: self.x2,
                limit: width,
            });
        }
        if self.y2 > height {
            return Err(CropError::OutOfBounds {
                field: "y2",
                value: self.y2,
                limit: height,
            });
        }
        if self.x1 >= self.x2 {
            return Err(CropError::EmptyRegion {
                field: "x1",
                value: self.x1,
                other: self.x2,
            });
        }
        if self.y1 >= self.y2 {
            return Err(CropError::EmptyRegion {
                field: "y1",
                value: self.y1,
                other: self.y2,
            });
        }
        Ok(())
    }
}

/// Largest side a baseline JPEG can carry.
pub const MAX_SCALED_DIMENSION: u32 = 65_535;

/// Optional target width; height follows the crop's aspect ratio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScaleSpec {
    pub width: Option<u32>,
}

impl ScaleSpec {
    pub fn to_width(width: u32) -> Self {
        ScaleSpec { width: Some(width) }
    }

    /// Output dimensions for a crop of `crop_width x crop_height`.
    ///
    /// `height' = round(crop_height * width' / crop_width)`, never below 1.
    /// Either side above `MAX_SCALED_DIMENSION` is rejected before anything
    /// is allocated.
    pub fn target_dimensions(
        &self,
        crop_width: u32,
        crop_height: u32,
    ) -> Result<(u32, u32), CropError> {
        match self.width {
            None => Ok((crop_width, crop_height)),
            Some(0) => Err(CropError::ZeroScaleWidth),
            Some(width) => {
                let scale_factor = width as f64 / crop_width as f64;
                let height = (crop_height as f64 * scale_factor).round();
                if width > MAX_SCALED_DIMENSION || height > MAX_SCALED_DIMENSION as f64 {
                    return Err(CropError::ScaleTooLarge {
                        width,
                        height: height as u64,
                        limit: MAX_SCALED_DIMENSION,
                    });
                }
                Ok((width, (height as u32).max(1)))
            }
        }
    }
}

pub struct CropScale;

impl CropScale {
    /// Crop `source` to `crop`, then resample to the width in `scale` (Lanczos3).
    pub fn apply(source: &Raster, crop: CropBox, scale: ScaleSpec) -> Result<Raster, CropError> {
        let (width, height) = source.dimensions();
        crop.check_within(width, height)?;

        let cropped =
            imageops::crop_imm(source, crop.x1, crop.y1, crop.width(), crop.height()).to_image();

        let (target_width, target_height) =
            scale.target_dimensions(cropped.width(), cropped.height())?;
        if (target_width, target_height) == cropped.dimensions() {
            return Ok(cropped);
        }

        tracing::debug!(
            crop_width = cropped.width(),
            crop_height = cropped.height(),
            target_width,
            target_height,
            "Scaling cropped region"
        );

        Ok(imageops::resize(
            &cropped,
            target_width,
            target_height,
            FilterType::Lanczos3,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn create_test_image(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, 0, 255])
        })
    }

    #[test]
    fn test_default_box_is_full_image() {
        let crop = CropRequest::default().resolve(100, 80).unwrap();
        assert_eq!(crop, CropBox::full(100, 80));
    }

    #[test]
    fn test_partial_request_keeps_other_defaults() {
        let crop = CropRequest {
            x1: Some(10),
            y2: Some(40),
            ..Default::default()
        }
        .resolve(100, 80)
        .unwrap();
        assert_eq!(
            crop,
            CropBox {
                x1: 10,
                y1: 0,
                x2: 100,
                y2: 40
            }
        );
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let err = CropRequest {
            x2: Some(101),
            ..Default::default()
        }
        .resolve(100, 80)
        .unwrap_err();
        assert_eq!(err.field(), "x2");

        let err = CropRequest {
            y2: Some(500),
            ..Default::default()
        }
        .resolve(100, 80)
        .unwrap_err();
        assert_eq!(err.field(), "y2");

        // x1 past the right edge collapses to an empty region
        let err = CropRequest {
            x1: Some(150),
            ..Default::default()
        }
        .resolve(100, 80)
        .unwrap_err();
        assert_eq!(err.field(), "x1");
    }

    #[test]
    fn test_empty_region_rejected() {
        let err = CropRequest {
            x1: Some(20),
            x2: Some(20),
            ..Default::default()
        }
        .resolve(100, 80)
        .unwrap_err();
        assert!(matches!(err, CropError::EmptyRegion { field: "x1", .. }));

        let err = CropRequest {
            y1: Some(50),
            y2: Some(10),
            ..Default::default()
        }
        .resolve(100, 80)
        .unwrap_err();
        assert_eq!(err.field(), "y1");
    }

    #[test]
    fn test_crop_extracts_region() {
        let img = create_test_image(100, 100);
        let crop = CropBox {
            x1: 10,
            y1: 20,
            x2: 60,
            y2: 50,
        };
        let out = CropScale::apply(&img, crop, ScaleSpec::default()).unwrap();
        assert_eq!(out.dimensions(), (50, 30));
        assert_eq!(out.get_pixel(0, 0), img.get_pixel(10, 20));
        assert_eq!(out.get_pixel(49, 29), img.get_pixel(59, 49));
    }

    #[test]
    fn test_scale_preserves_aspect_ratio() {
        let img = create_test_image(200, 100);
        let out = CropScale::apply(&img, CropBox::full(200, 100), ScaleSpec::to_width(50)).unwrap();
        assert_eq!(out.dimensions(), (50, 25));
    }

    #[test]
    fn test_scale_rounds_height() {
        // 30 * 20 / 70 = 8.57 -> 9
        assert_eq!(ScaleSpec::to_width(20).target_dimensions(70, 30), Ok((20, 9)));
        // 10 * 7 / 4 = 17.5 -> 18
        assert_eq!(ScaleSpec::to_width(7).target_dimensions(4, 10), Ok((7, 18)));
    }

    #[test]
    fn test_upscale() {
        let img = create_test_image(40, 30);
        let out = CropScale::apply(&img, CropBox::full(40, 30), ScaleSpec::to_width(120)).unwrap();
        assert_eq!(out.dimensions(), (120, 90));
    }

    #[test]
    fn test_thin_strip_height_never_zero() {
        assert_eq!(ScaleSpec::to_width(1).target_dimensions(1000, 1), Ok((1, 1)));
    }

    #[test]
    fn test_zero_width_rejected() {
        assert_eq!(
            ScaleSpec::to_width(0).target_dimensions(10, 10),
            Err(CropError::ZeroScaleWidth)
        );
    }

    #[test]
    fn test_oversized_width_rejected() {
        let err = ScaleSpec::to_width(u32::MAX)
            .target_dimensions(100, 100)
            .unwrap_err();
        assert_eq!(err.field(), "w");
        assert!(matches!(err, CropError::ScaleTooLarge { .. }));

        assert_eq!(
            ScaleSpec::to_width(MAX_SCALED_DIMENSION).target_dimensions(MAX_SCALED_DIMENSION, 1),
            Ok((MAX_SCALED_DIMENSION, 1))
        );
    }

    #[test]
    fn test_oversized_derived_height_rejected() {
        // 1x10 strip widened to 10000 would be 100000 tall
        let err = ScaleSpec::to_width(10_000).target_dimensions(1, 10).unwrap_err();
        assert!(matches!(
            err,
            CropError::ScaleTooLarge {
                width: 10_000,
                height: 100_000,
                ..
            }
        ));
    }

    #[test]
    fn test_apply_refuses_huge_scale_without_allocating() {
        let img = create_test_image(100, 100);
        let result = CropScale::apply(&img, CropBox::full(100, 100), ScaleSpec::to_width(u32::MAX));
        assert!(matches!(result, Err(CropError::ScaleTooLarge { .. })));
    }

    #[test]
    fn test_apply_rechecks_bounds() {
        let img = create_test_image(10, 10);
        let crop = CropBox {
            x1: 0,
            y1: 0,
            x2: 11,
            y2: 10,
        };
        assert!(CropScale::apply(&img, crop, ScaleSpec::default()).is_err());
    }
}
