//! Draws a prompt onto a fixed size canvas and stores it as a PNG
//!
//! The canvas is a light background with a left-to-right blue gradient band
//! over the top half, and the word-wrapped prompt centred horizontally,
//! sitting one sixth of the canvas height below true centre.

pub mod font;
pub mod wrap;

use std::path::Path;

use chrono::Utc;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use tracing::debug;

use crate::constants::{
    ACCENT_COLOR, BACKGROUND_COLOR, CANVAS_HEIGHT, CANVAS_WIDTH, GRADIENT_BLUE_OFFSET,
    LINE_SPACING, TEXT_COLOR,
};
use crate::error::PromptImgError;
use crate::storage::{GeneratedImage, persist_png, unique_filename};

pub use font::CaptionFont;
pub use wrap::{caption_lines, wrap_prompt};

/// Measured caption block and where it goes on the canvas.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CaptionLayout {
    /// Wrapped lines, top to bottom
    pub lines: Vec<String>,
    /// Width of each line in pixels
    pub line_widths: Vec<u32>,
    /// Height of a single line in pixels
    pub line_height: u32,
    /// Width of the widest line
    pub width: u32,
    /// Height of the whole block, spacing included
    pub height: u32,
    /// Left edge of the block
    pub x: i32,
    /// Top edge of the block
    pub y: i32,
}

impl CaptionLayout {
    /// Wraps and measures `prompt` and positions the block on the canvas.
    pub fn new(prompt: &str, font: &CaptionFont) -> Self {
        let lines = caption_lines(prompt);
        let line_widths: Vec<u32> = lines.iter().map(|line| font.line_width(line)).collect();
        let line_height = font.line_height();
        let width = line_widths.iter().copied().max().unwrap_or(0);
        let count = u32::try_from(lines.len()).unwrap_or(u32::MAX);
        let height = count
            .saturating_mul(line_height)
            .saturating_add(count.saturating_sub(1).saturating_mul(LINE_SPACING));
        let (x, y) = caption_origin(width, height);
        Self {
            lines,
            line_widths,
            line_height,
            width,
            height,
            x,
            y,
        }
    }

    /// Top-left corner of each line, each centred within the block.
    pub fn line_origins(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let advance = i64::from(self.line_height) + i64::from(LINE_SPACING);
        self.line_widths.iter().enumerate().map(move |(idx, width)| {
            let x = i64::from(self.x) + (i64::from(self.width) - i64::from(*width)) / 2;
            let y = i64::from(self.y) + advance * idx as i64;
            (clamp_i32(x), clamp_i32(y))
        })
    }
}

/// Horizontally centred; vertically centred then pushed down by a sixth of
/// the canvas height so the caption clears the gradient band.
pub fn caption_origin(text_width: u32, text_height: u32) -> (i32, i32) {
    let x = (i64::from(CANVAS_WIDTH) - i64::from(text_width)) / 2;
    let y = (i64::from(CANVAS_HEIGHT) - i64::from(text_height)) / 2 + i64::from(CANVAS_HEIGHT / 6);
    (clamp_i32(x), clamp_i32(y))
}

fn clamp_i32(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

/// Gradient colour for column `x`: accent red and green, blue scaled by
/// `x / width` plus an offset, saturating at 255.
pub fn gradient_color(x: u32) -> Rgb<u8> {
    let blue = u32::from(ACCENT_COLOR[2]) * x / CANVAS_WIDTH + GRADIENT_BLUE_OFFSET;
    Rgb([
        ACCENT_COLOR[0],
        ACCENT_COLOR[1],
        u8::try_from(blue).unwrap_or(u8::MAX),
    ])
}

fn draw_gradient(canvas: &mut RgbImage) {
    // line from (x, 0) to (x, height / 2), both ends included
    let band_height = CANVAS_HEIGHT / 2 + 1;
    for x in 0..CANVAS_WIDTH {
        draw_filled_rect_mut(
            canvas,
            Rect::at(x as i32, 0).of_size(1, band_height),
            gradient_color(x),
        );
    }
}

/// Draws the caption canvas for `prompt` without touching the filesystem.
pub fn render_caption(prompt: &str, font: &CaptionFont) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, Rgb(BACKGROUND_COLOR));
    draw_gradient(&mut canvas);

    let layout = CaptionLayout::new(prompt, font);
    debug!(
        "Caption layout: {} lines, {}x{} at ({}, {})",
        layout.lines.len(),
        layout.width,
        layout.height,
        layout.x,
        layout.y
    );
    for (line, (x, y)) in layout.lines.iter().zip(layout.line_origins()) {
        font.draw_line(&mut canvas, Rgb(TEXT_COLOR), x, y, line);
    }
    canvas
}

/// Renders `prompt` and writes it as a new uniquely named PNG in
/// `generated_dir`. Storage errors are returned as-is, there's no retry.
pub fn render_prompt(
    prompt: &str,
    generated_dir: &Path,
    font: &CaptionFont,
) -> Result<GeneratedImage, PromptImgError> {
    let canvas = render_caption(prompt, font);
    let filename = unique_filename(Utc::now());
    persist_png(generated_dir, &filename, &canvas)
}
