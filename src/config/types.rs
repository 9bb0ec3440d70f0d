use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MEDIA_ROOT: &str = "/app/data";
pub const DEFAULT_MIN_VOTE_COUNT: u64 = 500;
pub const DEFAULT_STATIC_OVERLAY_PATH: &str = "/app/overlays/static_overlay.png";
pub const DEFAULT_RATING_OVERLAY_DIR: &str = "/app/overlays/tmdb_ratings";
pub const DEFAULT_FONT_PATH: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf";
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 500;

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

/// Immutable run configuration, built once in `main` and borrowed by every
/// component.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub media_root: PathBuf,
    pub restore_mode: bool,
    /// Below this many TMDB votes the catalog rating badge is not drawn.
    pub min_vote_count: u64,
    /// Pause after each processed folder, to stay under TMDB rate limits.
    pub request_delay: Duration,
    pub static_overlay: StaticOverlayConfig,
    pub rating_overlay: RatingOverlayConfig,
    pub rendered_badge: RenderedBadgeConfig,
    pub refresh: RefreshConfig,
}

impl Config {
    /// A config with every optional feature disabled.
    pub fn new(api_key: impl Into<String>, media_root: impl Into<PathBuf>) -> Self {
        Self {
            api_key: api_key.into(),
            media_root: media_root.into(),
            restore_mode: false,
            min_vote_count: DEFAULT_MIN_VOTE_COUNT,
            request_delay: Duration::from_millis(DEFAULT_REQUEST_DELAY_MS),
            static_overlay: StaticOverlayConfig::default(),
            rating_overlay: RatingOverlayConfig::default(),
            rendered_badge: RenderedBadgeConfig::default(),
            refresh: RefreshConfig::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StaticOverlayConfig {
    pub enabled: bool,
    pub path: PathBuf,
}

impl Default for StaticOverlayConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: PathBuf::from(DEFAULT_STATIC_OVERLAY_PATH),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RatingOverlayConfig {
    pub enabled: bool,
    /// Directory holding `r0.png` .. `r100.png`.
    pub dir: PathBuf,
}

impl Default for RatingOverlayConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dir: PathBuf::from(DEFAULT_RATING_OVERLAY_DIR),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderedBadgeConfig {
    pub enabled: bool,
    pub font_path: PathBuf,
}

impl Default for RenderedBadgeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            font_path: PathBuf::from(DEFAULT_FONT_PATH),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RefreshConfig {
    pub enabled: bool,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub token: Option<String>,
    pub library_ids: Vec<String>,
}

impl RefreshConfig {
    /// True when every connection detail needed for a refresh is present.
    pub fn is_complete(&self) -> bool {
        self.enabled
            && self.host.as_deref().is_some_and(|h| !h.is_empty())
            && self.port.is_some()
            && self.token.as_deref().is_some_and(|t| !t.is_empty())
            && !self.library_ids.is_empty()
    }
}

// ---------------------------------------------------------------------------
// TOML file layout
// ---------------------------------------------------------------------------

/// On-disk configuration. Every field is optional; flags and environment
/// variables take precedence over the file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FileConfig {
    pub media_root: Option<PathBuf>,
    pub restore_mode: Option<bool>,
    pub request_delay_ms: Option<u64>,
    pub tmdb: TmdbSection,
    pub overlays: OverlaysSection,
    pub plex: PlexSection,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TmdbSection {
    pub api_key: Option<String>,
    pub min_vote_count: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OverlaysSection {
    #[serde(rename = "static")]
    pub static_overlay: StaticSection,
    pub rating: RatingSection,
    pub rendered_badge: RenderedBadgeSection,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticSection {
    pub enabled: Option<bool>,
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RatingSection {
    pub enabled: Option<bool>,
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderedBadgeSection {
    pub enabled: Option<bool>,
    pub font_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PlexSection {
    pub enabled: Option<bool>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub token: Option<String>,
    pub library_ids: Vec<String>,
}

// ---------------------------------------------------------------------------
// Command-line / environment overrides
// ---------------------------------------------------------------------------

/// Lenient on/off switch: `true`, `1`, `yes` and `on` (any case) enable a
/// feature, anything else disables it. Never fails.
pub fn parse_flag(value: &str) -> Result<bool, std::convert::Infallible> {
    let value = value.trim();
    Ok(["true", "1", "yes", "on"]
        .iter()
        .any(|v| value.eq_ignore_ascii_case(v)))
}

/// Settings taken from flags or, failing that, from the environment.
#[derive(Debug, Clone, Default, Args)]
pub struct Overrides {
    /// TMDB v3 API key
    #[arg(long, env = "TMDB_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Root directory containing movie folders
    #[arg(long, env = "MEDIA_ROOT", global = true)]
    pub media_root: Option<PathBuf>,

    /// Copy cached originals back over the final posters instead of processing
    #[arg(long, env = "RESTORE_MODE", global = true, num_args = 0..=1,
          default_missing_value = "true", value_parser = parse_flag)]
    pub restore_mode: Option<bool>,

    /// Minimum TMDB vote count required to draw the rating badge
    #[arg(long, env = "MIN_VOTE_COUNT", global = true)]
    pub min_vote_count: Option<u64>,

    /// Delay after each processed folder, in milliseconds
    #[arg(long, env = "REQUEST_DELAY_MS", global = true)]
    pub request_delay_ms: Option<u64>,

    /// Composite the static brand overlay
    #[arg(long, env = "APPLY_STATIC_OVERLAY", global = true, num_args = 0..=1,
          default_missing_value = "true", value_parser = parse_flag)]
    pub apply_static_overlay: Option<bool>,

    /// Path of the static overlay PNG
    #[arg(long, env = "STATIC_OVERLAY_PATH", global = true)]
    pub static_overlay_path: Option<PathBuf>,

    /// Composite the pre-rendered TMDB rating badge
    #[arg(long, env = "APPLY_TMDB_RATING", global = true, num_args = 0..=1,
          default_missing_value = "true", value_parser = parse_flag)]
    pub apply_tmdb_rating: Option<bool>,

    /// Directory holding r0.png .. r100.png
    #[arg(long, env = "TMDB_OVERLAY_DIR", global = true)]
    pub tmdb_overlay_dir: Option<PathBuf>,

    /// Draw the rating text badge in the bottom-right corner
    #[arg(long, env = "APPLY_IMDB_RATING", global = true, num_args = 0..=1,
          default_missing_value = "true", value_parser = parse_flag)]
    pub apply_imdb_rating: Option<bool>,

    /// Bold font used for the rating text badge
    #[arg(long, env = "RATING_FONT_PATH", global = true)]
    pub rating_font_path: Option<PathBuf>,

    /// Ask Plex to rescan its libraries after the run
    #[arg(long, env = "PLEX_REFRESH", global = true, num_args = 0..=1,
          default_missing_value = "true", value_parser = parse_flag)]
    pub plex_refresh: Option<bool>,

    #[arg(long, env = "PLEX_IP", global = true)]
    pub plex_ip: Option<String>,

    #[arg(long, env = "PLEX_PORT", global = true)]
    pub plex_port: Option<u16>,

    #[arg(long, env = "PLEX_TOKEN", global = true, hide_env_values = true)]
    pub plex_token: Option<String>,

    /// Comma-separated Plex library section IDs
    #[arg(long = "plex-library-id", env = "PLEX_LIBRARY_ID", global = true,
          value_delimiter = ',')]
    pub plex_library_ids: Vec<String>,
}
