//! Shared constants for drawing and serving images
//!

/// Canvas width in pixels
pub const CANVAS_WIDTH: u32 = 1024;

/// Canvas height in pixels
pub const CANVAS_HEIGHT: u32 = 512;

/// Flood fill for the whole canvas
pub const BACKGROUND_COLOR: [u8; 3] = [245, 245, 245];

/// Base colour of the gradient band, the blue channel is scaled per column.
pub const ACCENT_COLOR: [u8; 3] = [66, 135, 245];

/// Added to the scaled blue channel of the gradient.
pub const GRADIENT_BLUE_OFFSET: u32 = 50;

/// Caption colour
pub const TEXT_COLOR: [u8; 3] = [33, 33, 33];

/// Font size (pixels per em) for the scalable font.
pub const FONT_SIZE: f32 = 36.0;

/// Pixels between wrapped caption lines.
pub const LINE_SPACING: u32 = 8;

/// Columns per caption line.
pub const WRAP_COLUMNS: usize = 40;

/// Caption used when the prompt is empty.
pub const EMPTY_PROMPT_PLACEHOLDER: &str = "(Trống)";

/// Name of the directory under the static root holding generated images.
pub const GENERATED_DIR_NAME: &str = "generated";

/// URL prefix the static root is mounted at.
pub const STATIC_URL_PREFIX: &str = "/static";

/// Generated images are never rewritten, so caches may keep them for a year.
pub const STATIC_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// Where we look for the preferred font when no path is configured.
pub const DEFAULT_FONT_PATHS: &[&str] = &[
    "DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/local/share/fonts/DejaVuSans.ttf",
    "/Library/Fonts/DejaVuSans.ttf",
];
