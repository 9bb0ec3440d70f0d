//! Poster files on disk.
//!
//! Each movie folder keeps a pristine copy of its TMDB poster under a reserved
//! cache subfolder and a derived `poster.jpg` at its top level. This module
//! owns that layout ([`storage`]) and the download-and-cache step ([`acquire`]).

pub mod acquire;
mod storage;

pub use acquire::{Acquisition, PosterAcquirer};
pub use storage::{
    encode_jpeg, write_atomic, PosterPaths, CACHE_DIR_NAME, CACHE_FILE_NAME, CACHE_JPEG_QUALITY,
    CANONICAL_HEIGHT, CANONICAL_WIDTH, FINAL_FILE_NAME, FINAL_JPEG_QUALITY,
};
