//! Download-and-cache of the pristine TMDB poster.
//!
//! The cache file is written once and then trusted forever: a folder whose
//! cache exists costs no network traffic at all.

use std::sync::Arc;
use std::time::Duration;

use image::imageops::FilterType;
use tracing::{debug, info};

use super::storage::{
    encode_jpeg, write_atomic, PosterPaths, CACHE_JPEG_QUALITY, CANONICAL_HEIGHT, CANONICAL_WIDTH,
};
use crate::error::AcquireError;
use crate::http::HttpGet;
use crate::metadata::providers::tmdb::poster_url;
use crate::metadata::MetadataProvider;
use crate::scanner::MovieFolder;

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(20);

/// How a folder came to have its cached original.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquisition {
    /// The cache file was already present; nothing was fetched.
    AlreadyCached,
    /// The poster was downloaded, resized and written to the cache.
    Downloaded,
}

/// Fetches a folder's poster from TMDB into its cache subfolder.
pub struct PosterAcquirer<'a> {
    metadata: &'a dyn MetadataProvider,
    http: Arc<dyn HttpGet>,
}

impl<'a> PosterAcquirer<'a> {
    pub fn new(metadata: &'a dyn MetadataProvider, http: Arc<dyn HttpGet>) -> Self {
        Self { metadata, http }
    }

    /// Ensure the folder has a cached original poster.
    ///
    /// Any error means the folder should be skipped for this run.
    pub fn acquire(&self, folder: &MovieFolder) -> Result<Acquisition, AcquireError> {
        let paths = PosterPaths::for_folder(&folder.path);
        if paths.has_cached_original() {
            debug!("Original poster already cached");
            return Ok(Acquisition::AlreadyCached);
        }

        let details = self.metadata.movie_details(folder.tmdb_id)?;
        let fragment = details
            .poster_path
            .ok_or(AcquireError::NoPosterPath(folder.tmdb_id))?;

        let url = poster_url(&fragment);
        info!(url = %url, "Downloading original poster");
        let bytes = self
            .http
            .get(&url, DOWNLOAD_TIMEOUT)
            .map_err(|source| AcquireError::Download {
                url: url.clone(),
                source,
            })?;

        let img = image::load_from_memory(&bytes).map_err(AcquireError::Decode)?;
        let resized = img
            .resize_exact(CANONICAL_WIDTH, CANONICAL_HEIGHT, FilterType::Lanczos3)
            .to_rgb8();
        let data = encode_jpeg(&resized, CACHE_JPEG_QUALITY).map_err(AcquireError::Encode)?;

        std::fs::create_dir_all(&paths.cache_dir)?;
        write_atomic(&paths.cache_file, &data)?;

        info!(path = %paths.cache_file.display(), "Saved original poster");
        Ok(Acquisition::Downloaded)
    }
}
