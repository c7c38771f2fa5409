//! Caption font lookup, with a built-in bitmap fallback
//!
//! Lookup is two steps: try the preferred TrueType font, and on any failure
//! use the 8x8 bitmap font compiled into the binary. Font problems are never
//! surfaced to callers.

use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use font8x8::{BASIC_FONTS, LATIN_FONTS, UnicodeFonts};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};
use tracing::{debug, info, warn};

use crate::constants::{DEFAULT_FONT_PATHS, FONT_SIZE};
use crate::error::PromptImgError;

/// Each bitmap glyph pixel becomes a square this many pixels wide.
const BITMAP_SCALE: u32 = 2;
const BITMAP_GLYPH_SIZE: u32 = 8;

/// The font captions are drawn with.
pub enum CaptionFont {
    /// A TrueType/OpenType font loaded from disk.
    Scalable {
        /// Parsed font data
        font: FontVec,
        /// Pixel scale giving [`FONT_SIZE`] pixels per em
        scale: PxScale,
    },
    /// The built-in fixed size bitmap font.
    Bitmap,
}

impl CaptionFont {
    /// Loads the preferred font, falling back to [`CaptionFont::Bitmap`].
    ///
    /// With `preferred` set only that file is tried, otherwise
    /// [`DEFAULT_FONT_PATHS`] are tried in order.
    pub fn load(preferred: Option<&Path>) -> Self {
        let candidates: Vec<PathBuf> = match preferred {
            Some(path) => vec![path.to_path_buf()],
            None => DEFAULT_FONT_PATHS.iter().map(PathBuf::from).collect(),
        };

        for path in candidates {
            match Self::from_file(&path) {
                Ok(font) => {
                    info!("Using caption font {}", path.display());
                    return font;
                }
                Err(err) => debug!("Skipping font {}: {}", path.display(), err),
            }
        }

        warn!("No scalable font could be loaded, falling back to the built-in bitmap font");
        Self::Bitmap
    }

    /// Parses a font file sized at [`FONT_SIZE`].
    pub fn from_file(path: &Path) -> Result<Self, PromptImgError> {
        let data = std::fs::read(path)?;
        let font = FontVec::try_from_vec(data)?;
        let scale = match font.units_per_em() {
            Some(units_per_em) => PxScale::from(FONT_SIZE * font.height_unscaled() / units_per_em),
            None => PxScale::from(FONT_SIZE),
        };
        Ok(Self::Scalable { font, scale })
    }

    /// Rendered width of a single line, in pixels.
    pub fn line_width(&self, line: &str) -> u32 {
        match self {
            Self::Scalable { font, scale } => text_size(*scale, font, line).0,
            Self::Bitmap => {
                let chars = u32::try_from(line.chars().count()).unwrap_or(u32::MAX);
                chars.saturating_mul(BITMAP_GLYPH_SIZE * BITMAP_SCALE)
            }
        }
    }

    /// Height of one line, in pixels. Every line has the same height.
    pub fn line_height(&self) -> u32 {
        match self {
            Self::Scalable { font, scale } => font.as_scaled(*scale).height().ceil() as u32,
            Self::Bitmap => BITMAP_GLYPH_SIZE * BITMAP_SCALE,
        }
    }

    /// Draws `line` with its top-left corner at (`x`, `y`). Anything falling
    /// outside the canvas is clipped.
    pub fn draw_line(&self, canvas: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, line: &str) {
        match self {
            Self::Scalable { font, scale } => draw_text_mut(canvas, color, x, y, *scale, font, line),
            Self::Bitmap => {
                let advance = (BITMAP_GLYPH_SIZE * BITMAP_SCALE) as i32;
                for (idx, ch) in line.chars().enumerate() {
                    let glyph_x = x.saturating_add(advance.saturating_mul(idx as i32));
                    if let Some(glyph) = bitmap_glyph(ch) {
                        blit_glyph(canvas, color, glyph_x, y, &glyph);
                    }
                }
            }
        }
    }

}

impl std::fmt::Debug for CaptionFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scalable { scale, .. } => f
                .debug_struct("Scalable")
                .field("scale", &(scale.x, scale.y))
                .finish_non_exhaustive(),
            Self::Bitmap => f.write_str("Bitmap"),
        }
    }
}

fn bitmap_glyph(ch: char) -> Option<[u8; 8]> {
    BASIC_FONTS.get(ch).or_else(|| LATIN_FONTS.get(ch))
}

/// Bit 0 of each row byte is the leftmost pixel.
fn blit_glyph(canvas: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, glyph: &[u8; 8]) {
    let (width, height) = canvas.dimensions();
    for (row, bits) in glyph.iter().enumerate() {
        for col in 0..BITMAP_GLYPH_SIZE {
            if bits & (1 << col) == 0 {
                continue;
            }
            for dy in 0..BITMAP_SCALE {
                for dx in 0..BITMAP_SCALE {
                    let px = i64::from(x) + i64::from(col * BITMAP_SCALE + dx);
                    let py = i64::from(y) + (row as i64) * i64::from(BITMAP_SCALE) + i64::from(dy);
                    if px < 0 || py < 0 || px >= i64::from(width) || py >= i64::from(height) {
                        continue;
                    }
                    canvas.put_pixel(px as u32, py as u32, color);
                }
            }
        }
    }
}
