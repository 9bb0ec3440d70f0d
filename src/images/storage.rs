//! Per-folder poster layout and JPEG persistence.
//!
//! A movie folder looks like this after processing:
//!
//! ```text
//! Movie (2020) [tmdbid-603]/
//! ├── original/
//! │   └── original_poster.jpg   1000x1500, q90, never rewritten
//! └── poster.jpg                derived, q95, rebuilt every run
//! ```

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{ImageError, RgbImage};

pub const CACHE_DIR_NAME: &str = "original";
pub const CACHE_FILE_NAME: &str = "original_poster.jpg";
pub const FINAL_FILE_NAME: &str = "poster.jpg";

pub const CANONICAL_WIDTH: u32 = 1000;
pub const CANONICAL_HEIGHT: u32 = 1500;

pub const CACHE_JPEG_QUALITY: u8 = 90;
pub const FINAL_JPEG_QUALITY: u8 = 95;

/// Paths of the cached original and the final poster for one folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterPaths {
    pub cache_dir: PathBuf,
    pub cache_file: PathBuf,
    pub final_file: PathBuf,
}

impl PosterPaths {
    pub fn for_folder(folder: &Path) -> Self {
        let cache_dir = folder.join(CACHE_DIR_NAME);
        Self {
            cache_file: cache_dir.join(CACHE_FILE_NAME),
            cache_dir,
            final_file: folder.join(FINAL_FILE_NAME),
        }
    }

    pub fn has_cached_original(&self) -> bool {
        self.cache_file.is_file()
    }
}

/// Encode an RGB image as baseline JPEG at the given quality.
pub fn encode_jpeg(img: &RgbImage, quality: u8) -> Result<Vec<u8>, ImageError> {
    let mut buf = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buf, quality).encode_image(img)?;
    Ok(buf.into_inner())
}

/// Write `data` to `path` through a temporary sibling and a rename, so a
/// failure never leaves a truncated file at `path`.
pub fn write_atomic(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let temp_suffix = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let tmp_path = path.with_extension(format!("tmp.{}", temp_suffix));

    if let Err(e) = std::fs::write(&tmp_path, data) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e);
    }

    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e);
    }

    Ok(())
}
