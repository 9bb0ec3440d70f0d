//! TMDB (The Movie Database) metadata provider.
//!
//! Implements [`MetadataProvider`] with a single call to the TMDB v3 movie
//! detail endpoint. Requests carry a 10-second timeout and are never retried;
//! pacing between folders is the caller's job.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::MetadataError;
use crate::http::HttpGet;
use crate::metadata::provider::{MetadataProvider, MovieMetadata};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
const TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p/";
const IMAGE_SIZE: &str = "original";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// TMDB API response types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TmdbMovieDetail {
    id: u64,
    poster_path: Option<String>,
    #[serde(default)]
    vote_average: f64,
    #[serde(default)]
    vote_count: u64,
    imdb_id: Option<String>,
    external_ids: Option<TmdbExternalIds>,
}

#[derive(Debug, Deserialize)]
struct TmdbExternalIds {
    imdb_id: Option<String>,
}

impl From<TmdbMovieDetail> for MovieMetadata {
    fn from(detail: TmdbMovieDetail) -> Self {
        let imdb_id = detail
            .external_ids
            .and_then(|ext| ext.imdb_id)
            .or(detail.imdb_id)
            .filter(|id| !id.is_empty());

        Self {
            id: detail.id,
            poster_path: detail.poster_path.filter(|p| !p.is_empty()),
            vote_average: detail.vote_average,
            vote_count: detail.vote_count,
            imdb_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// TMDB movie detail client.
pub struct TmdbClient {
    http: Arc<dyn HttpGet>,
    api_key: String,
}

impl TmdbClient {
    pub fn new(http: Arc<dyn HttpGet>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            api_key: api_key.into(),
        }
    }

    /// Detail endpoint URL, including cross-reference IDs.
    fn detail_url(&self, id: u64) -> String {
        format!(
            "{TMDB_BASE_URL}/movie/{id}?api_key={}&append_to_response=external_ids",
            self.api_key
        )
    }
}

/// Full image URL for a TMDB poster path fragment, at original resolution.
pub fn poster_url(fragment: &str) -> String {
    format!("{TMDB_IMAGE_BASE}{IMAGE_SIZE}{fragment}")
}

impl MetadataProvider for TmdbClient {
    fn name(&self) -> &'static str {
        "tmdb"
    }

    fn movie_details(&self, id: u64) -> Result<MovieMetadata, MetadataError> {
        debug!(tmdb_id = id, "TMDB get movie details");

        let body = self
            .http
            .get(&self.detail_url(id), REQUEST_TIMEOUT)
            .map_err(|source| MetadataError::Request { id, source })?;

        let detail: TmdbMovieDetail = serde_json::from_slice(&body)
            .map_err(|source| MetadataError::Decode { id, source })?;

        Ok(detail.into())
    }
}
