//! Naming and persistence of generated images
//!
//! The generated directory is append-only: files are created with a fresh
//! unique name and never rewritten or removed.

use std::fs::OpenOptions;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use image::{ImageFormat, RgbImage};

use crate::constants::{GENERATED_DIR_NAME, STATIC_URL_PREFIX};
use crate::error::PromptImgError;

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";
const TIMESTAMP_LEN: usize = 14;
const TOKEN_LEN: usize = 32;

/// An image written to the generated directory.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratedImage {
    /// Bare file name, eg `20260101120000_<32 hex>.png`
    pub filename: String,
    /// Full path on disk
    pub path: PathBuf,
}

impl GeneratedImage {
    /// URL the image is served from.
    pub fn url(&self) -> String {
        format!("{STATIC_URL_PREFIX}/{GENERATED_DIR_NAME}/{}", self.filename)
    }
}

/// Where generated images live for a given static root.
pub fn generated_dir(static_root: &Path) -> PathBuf {
    static_root.join(GENERATED_DIR_NAME)
}

/// Creates the generated directory (and parents) if it's missing.
pub async fn ensure_generated_dir(static_root: &Path) -> Result<PathBuf, PromptImgError> {
    let dir = generated_dir(static_root);
    tokio::fs::create_dir_all(&dir).await?;
    Ok(dir)
}

/// UTC timestamp to the second, an underscore, then a random 32 char hex token.
pub fn unique_filename(now: DateTime<Utc>) -> String {
    format!(
        "{}_{}.png",
        now.format(TIMESTAMP_FORMAT),
        uuid::Uuid::new_v4().simple()
    )
}

/// Checks a name has the shape [`unique_filename`] produces.
pub fn is_generated_filename(name: &str) -> bool {
    let Some(stem) = name.strip_suffix(".png") else {
        return false;
    };
    let Some((timestamp, token)) = stem.split_once('_') else {
        return false;
    };
    timestamp.len() == TIMESTAMP_LEN
        && timestamp.bytes().all(|byte| byte.is_ascii_digit())
        && token.len() == TOKEN_LEN
        && token
            .bytes()
            .all(|byte| byte.is_ascii_digit() || (b'a'..=b'f').contains(&byte))
}

/// PNG-encodes `image` into `dir/filename`. Fails rather than replace an
/// existing file, and only accepts names from [`unique_filename`].
pub fn persist_png(
    dir: &Path,
    filename: &str,
    image: &RgbImage,
) -> Result<GeneratedImage, PromptImgError> {
    if !is_generated_filename(filename) {
        return Err(PromptImgError::InvalidFilename(filename.to_string()));
    }
    let path = dir.join(filename);
    let file = OpenOptions::new().write(true).create_new(true).open(&path)?;
    let mut writer = BufWriter::new(file);
    image.write_to(&mut writer, ImageFormat::Png)?;
    writer
        .into_inner()
        .map_err(|err| PromptImgError::Io(err.into_error()))?
        .sync_all()?;
    Ok(GeneratedImage {
        filename: filename.to_string(),
        path,
    })
}
