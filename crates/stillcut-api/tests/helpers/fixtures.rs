//! Test fixtures: JPEG blobs built in memory.

use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};

/// Solid-color JPEG of the given size.
pub fn create_test_jpeg(width: u32, height: u32) -> Vec<u8> {
    create_solid_jpeg(width, height, [20, 20, 20])
}

pub fn create_solid_jpeg(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb(rgb));
    let mut buffer = Vec::new();
    JpegEncoder::new(&mut buffer)
        .encode_image(&img)
        .expect("Failed to encode test JPEG");
    buffer
}

pub fn decode(data: &[u8]) -> image::RgbImage {
    image::load_from_memory_with_format(data, image::ImageFormat::Jpeg)
        .expect("Response is not a JPEG")
        .to_rgb8()
}

/// Brightest red channel value inside `[x0, x1) x [y0, y1)`.
pub fn brightest_in(img: &image::RgbImage, x0: u32, x1: u32, y0: u32, y1: u32) -> u8 {
    let mut max = 0;
    for y in y0..y1.min(img.height()) {
        for x in x0..x1.min(img.width()) {
            max = max.max(img.get_pixel(x, y).0[0]);
        }
    }
    max
}
