//! Trait definition and record type for movie metadata lookups.

use serde::{Deserialize, Serialize};

use crate::error::MetadataError;

/// The parts of a catalog record the poster pipeline needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieMetadata {
    /// Catalog ID the record was fetched for.
    pub id: u64,
    /// Image path fragment such as `/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg`.
    pub poster_path: Option<String>,
    /// Average audience rating, 0.0 - 10.0.
    pub vote_average: f64,
    /// Number of votes behind `vote_average`.
    pub vote_count: u64,
    /// IMDb cross-reference ID, when the catalog knows one.
    pub imdb_id: Option<String>,
}

/// Blocking metadata source. One call is one request; there are no retries.
pub trait MetadataProvider: Send + Sync {
    /// Short, lowercase identifier for this provider (e.g. `"tmdb"`).
    fn name(&self) -> &'static str;

    /// Fetch the detail record for a movie.
    fn movie_details(&self, id: u64) -> Result<MovieMetadata, MetadataError>;
}
