//! Text label overlay
//!
//! Renders a single line of text with the 8x8 `font8x8` basic Latin glyphs,
//! one pixel per glyph bit at full opacity. The anchor is the text baseline,
//! so glyph rows land on `anchor.y - 8 ..= anchor.y - 1`. Pixels falling
//! outside the raster are skipped.

use crate::Raster;
use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::Rgba;

/// Baseline start of the label, in pixels from the top-left corner.
pub const DEFAULT_LABEL_ANCHOR: (i32, i32) = (10, 20);

const GLYPH_SIZE: i32 = 8;
const FALLBACK_GLYPH: char = '?';

/// 24-bit label color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl LabelColor {
    pub const WHITE: LabelColor = LabelColor {
        r: 255,
        g: 255,
        b: 255,
    };

    /// Parse `RRGGBB` (exactly six hex digits).
    pub fn parse_hex(s: &str) -> Option<Self> {
        if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(s, 16).ok()?;
        Some(LabelColor {
            r: (value >> 16) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        })
    }

    /// Lenient lookup for the `color` query value: anything unparseable is white.
    pub fn from_param(param: Option<&str>) -> Self {
        match param.filter(|s| !s.is_empty()) {
            Some(s) => Self::parse_hex(s).unwrap_or_else(|| {
                tracing::debug!(color = %s, "Unparseable label color, using white");
                Self::WHITE
            }),
            None => Self::WHITE,
        }
    }

    fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 255])
    }
}

impl Default for LabelColor {
    fn default() -> Self {
        Self::WHITE
    }
}

/// How (and whether) a render is labelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelConfig {
    pub color: LabelColor,
    /// Append requester IP and user agent. Opt-in only.
    pub include_identity: bool,
    /// Draw nothing at all
    pub suppressed: bool,
}

pub struct LabelOverlay;

impl LabelOverlay {
    /// Draw `text` onto `raster` in place, starting at baseline `anchor`.
    pub fn draw(raster: &mut Raster, text: &str, anchor: (i32, i32), color: LabelColor) {
        let (width, height) = raster.dimensions();
        let (width, height) = (width as i64, height as i64);
        let pixel = color.to_rgba();
        let top = anchor.1 - GLYPH_SIZE;

        for (index, ch) in text.chars().enumerate() {
            let glyph = BASIC_FONTS
                .get(ch)
                .or_else(|| BASIC_FONTS.get(FALLBACK_GLYPH))
                .unwrap_or([0; 8]);
            let left = anchor.0 as i64 + index as i64 * GLYPH_SIZE as i64;
            if left >= width {
                break;
            }

            for (row, bits) in glyph.iter().enumerate() {
                let y = top as i64 + row as i64;
                if y < 0 || y >= height {
                    continue;
                }
                for col in 0..GLYPH_SIZE as i64 {
                    if (bits >> col) & 1 == 0 {
                        continue;
                    }
                    let x = left + col;
                    if x < 0 || x >= width {
                        continue;
                    }
                    raster.put_pixel(x as u32, y as u32, pixel);
                }
            }
        }
    }
}
