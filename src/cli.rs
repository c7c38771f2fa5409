//! CLI parser
use clap::Parser;
use std::num::NonZeroU16;
use std::path::PathBuf;

#[derive(Parser, Debug)]
/// CLI Options
pub struct CliOptions {
    #[clap(long, help = "Enable debug logging", env = "PROMPTIMG_DEBUG")]
    /// Enable debug logging. Env: PROMPTIMG_DEBUG
    pub debug: bool,
    #[clap(long, short, default_value = "5000", env = "PORT")]
    /// http listener, defaults to `5000`.
    /// Env: PORT
    pub port: NonZeroU16,
    #[clap(long, short, default_value = "0.0.0.0", env = "PROMPTIMG_LISTEN_ADDRESS")]
    /// Listen address, defaults to `0.0.0.0`.
    /// Env: PROMPTIMG_LISTEN_ADDRESS
    pub listen_address: String,
    #[clap(long, short, default_value = "./static", env = "PROMPTIMG_STATIC_DIR")]
    /// Static root, generated images go in `<static_dir>/generated`.
    /// Env: PROMPTIMG_STATIC_DIR
    pub static_dir: PathBuf,
    #[clap(long, short, env = "PROMPTIMG_FONT_PATH")]
    /// TrueType font for captions, eg `/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf`.
    /// When unset a few well known DejaVuSans locations are tried.
    /// Env: PROMPTIMG_FONT_PATH
    pub font_path: Option<PathBuf>,
}
