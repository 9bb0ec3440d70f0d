//! Rating-to-asset mapping for the pre-rendered TMDB badge set.

use std::path::{Path, PathBuf};

/// Percent bucket for a 0-10 rating: `clamp(round(rating * 10), 0, 100)`.
///
/// Halves round to even (72.5 -> 72), which is what the badge sets were
/// generated against.
pub fn rating_percent(vote_average: f64) -> u8 {
    (vote_average * 10.0).round_ties_even().clamp(0.0, 100.0) as u8
}

/// `r<percent>.png`
pub fn badge_file_name(percent: u8) -> String {
    format!("r{percent}.png")
}

pub fn badge_asset_path(dir: &Path, percent: u8) -> PathBuf {
    dir.join(badge_file_name(percent))
}

/// Whether enough votes back the rating for a badge to be shown.
pub fn meets_vote_threshold(vote_count: u64, min_vote_count: u64) -> bool {
    vote_count >= min_vote_count
}
