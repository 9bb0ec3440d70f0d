//! TMDB ID extraction from folder names.
//!
//! Movie folders carry their catalog ID as a `[tmdbid-<digits>]` tag anywhere
//! in the name, e.g. `Heat (1995) [tmdbid-949]`.

use regex::Regex;
use std::sync::LazyLock;

static TMDB_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[tmdbid-(\d+)\]").unwrap());

/// Extract the TMDB ID from a folder name.
///
/// Returns `None` when the tag is absent or the number does not fit in a `u64`.
pub fn parse_tmdb_id(name: &str) -> Option<u64> {
    TMDB_ID_PATTERN
        .captures(name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
