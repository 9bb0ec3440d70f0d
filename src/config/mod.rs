mod types;

pub use types::*;

use crate::error::ConfigError;
use std::path::Path;
use std::time::Duration;

/// Load the optional TOML configuration file.
pub fn load_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the config file from a custom path or the default locations, or an
/// empty file config when none exists.
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<FileConfig, ConfigError> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./posterforge.toml",
        "~/.config/posterforge/config.toml",
        "/etc/posterforge/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(FileConfig::default())
}

/// Merge overrides over the file config over the defaults, and validate the
/// result. Fails on a missing API key or a media root that is not a directory.
pub fn resolve(file: FileConfig, overrides: &Overrides) -> Result<Config, ConfigError> {
    let api_key = overrides
        .api_key
        .clone()
        .or(file.tmdb.api_key)
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .ok_or(ConfigError::MissingApiKey)?;

    let media_root = overrides
        .media_root
        .clone()
        .or(file.media_root)
        .unwrap_or_else(|| DEFAULT_MEDIA_ROOT.into());
    if !media_root.is_dir() {
        return Err(ConfigError::MediaRootNotFound(media_root));
    }

    let overlays = file.overlays;
    let plex = file.plex;

    let library_ids = if overrides.plex_library_ids.is_empty() {
        plex.library_ids
    } else {
        overrides.plex_library_ids.clone()
    };

    Ok(Config {
        api_key,
        media_root,
        restore_mode: overrides.restore_mode.or(file.restore_mode).unwrap_or(false),
        min_vote_count: overrides
            .min_vote_count
            .or(file.tmdb.min_vote_count)
            .unwrap_or(DEFAULT_MIN_VOTE_COUNT),
        request_delay: Duration::from_millis(
            overrides
                .request_delay_ms
                .or(file.request_delay_ms)
                .unwrap_or(DEFAULT_REQUEST_DELAY_MS),
        ),
        static_overlay: StaticOverlayConfig {
            enabled: overrides
                .apply_static_overlay
                .or(overlays.static_overlay.enabled)
                .unwrap_or(false),
            path: overrides
                .static_overlay_path
                .clone()
                .or(overlays.static_overlay.path)
                .unwrap_or_else(|| DEFAULT_STATIC_OVERLAY_PATH.into()),
        },
        rating_overlay: RatingOverlayConfig {
            enabled: overrides
                .apply_tmdb_rating
                .or(overlays.rating.enabled)
                .unwrap_or(false),
            dir: overrides
                .tmdb_overlay_dir
                .clone()
                .or(overlays.rating.dir)
                .unwrap_or_else(|| DEFAULT_RATING_OVERLAY_DIR.into()),
        },
        rendered_badge: RenderedBadgeConfig {
            enabled: overrides
                .apply_imdb_rating
                .or(overlays.rendered_badge.enabled)
                .unwrap_or(false),
            font_path: overrides
                .rating_font_path
                .clone()
                .or(overlays.rendered_badge.font_path)
                .unwrap_or_else(|| DEFAULT_FONT_PATH.into()),
        },
        refresh: RefreshConfig {
            enabled: overrides.plex_refresh.or(plex.enabled).unwrap_or(false),
            host: non_blank(overrides.plex_ip.clone().or(plex.host)),
            port: overrides.plex_port.or(plex.port),
            token: non_blank(overrides.plex_token.clone().or(plex.token)),
            library_ids: parse_library_ids(&library_ids),
        },
    })
}

/// Trim section IDs and drop empty entries (`"1, ,2,"` -> `["1", "2"]`).
pub fn parse_library_ids<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    raw.iter()
        .flat_map(|s| s.as_ref().split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn overrides_for(root: &Path) -> Overrides {
        Overrides {
            api_key: Some("key".into()),
            media_root: Some(root.to_path_buf()),
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = resolve(FileConfig::default(), &overrides_for(dir.path())).unwrap();

        assert_eq!(config.api_key, "key");
        assert_eq!(config.min_vote_count, 500);
        assert_eq!(config.request_delay, Duration::from_millis(500));
        assert!(!config.restore_mode);
        assert!(!config.static_overlay.enabled);
        assert!(!config.rating_overlay.enabled);
        assert!(!config.rendered_badge.enabled);
        assert_eq!(config.rendered_badge.font_path, Path::new(DEFAULT_FONT_PATH));
        assert!(!config.refresh.enabled);
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut overrides = overrides_for(dir.path());
        overrides.api_key = None;
        assert_matches!(
            resolve(FileConfig::default(), &overrides),
            Err(ConfigError::MissingApiKey)
        );

        overrides.api_key = Some("   ".into());
        assert_matches!(
            resolve(FileConfig::default(), &overrides),
            Err(ConfigError::MissingApiKey)
        );
    }

    #[test]
    fn test_media_root_must_be_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not-a-dir");
        std::fs::write(&file, b"x").unwrap();

        assert_matches!(
            resolve(FileConfig::default(), &overrides_for(&file)),
            Err(ConfigError::MediaRootNotFound(p)) if p == file
        );
        assert_matches!(
            resolve(FileConfig::default(), &overrides_for(&dir.path().join("missing"))),
            Err(ConfigError::MediaRootNotFound(_))
        );
    }

    #[test]
    fn test_overrides_win_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let file: FileConfig = toml::from_str(
            r#"
            request_delay_ms = 0

            [tmdb]
            api_key = "from-file"
            min_vote_count = 10

            [overlays.static]
            enabled = true
            path = "/file/overlay.png"

            [plex]
            enabled = true
            host = "10.0.0.2"
            port = 32400
            token = "abc"
            library_ids = ["1", "2"]
            "#,
        )
        .unwrap();

        let mut overrides = overrides_for(dir.path());
        overrides.min_vote_count = Some(1000);
        overrides.plex_library_ids = vec!["7".into()];

        let config = resolve(file, &overrides).unwrap();
        assert_eq!(config.api_key, "key");
        assert_eq!(config.min_vote_count, 1000);
        assert_eq!(config.request_delay, Duration::ZERO);
        assert!(config.static_overlay.enabled);
        assert_eq!(config.static_overlay.path, Path::new("/file/overlay.png"));
        assert_eq!(config.refresh.library_ids, vec!["7".to_string()]);
        assert!(config.refresh.is_complete());
    }

    #[test]
    fn test_file_api_key_used_when_no_override() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = FileConfig::default();
        file.tmdb.api_key = Some("from-file".into());
        let mut overrides = overrides_for(dir.path());
        overrides.api_key = None;

        let config = resolve(file, &overrides).unwrap();
        assert_eq!(config.api_key, "from-file");
    }

    #[test]
    fn test_parse_flag_is_lenient() {
        for on in ["true", "TRUE", " True ", "1", "yes", "on"] {
            assert_eq!(parse_flag(on), Ok(true), "{on:?}");
        }
        for off in ["false", "0", "no", "enabled", "", "treu"] {
            assert_eq!(parse_flag(off), Ok(false), "{off:?}");
        }
    }

    #[test]
    fn test_parse_library_ids() {
        assert_eq!(parse_library_ids(&["1", " 2", "", " "]), vec!["1", "2"]);
        assert_eq!(parse_library_ids(&["1, ,3,"]), vec!["1", "3"]);
        assert!(parse_library_ids::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_refresh_incomplete() {
        let mut refresh = RefreshConfig {
            enabled: true,
            host: Some("plex".into()),
            port: Some(32400),
            token: Some("t".into()),
            library_ids: vec!["1".into()],
        };
        assert!(refresh.is_complete());

        refresh.library_ids.clear();
        assert!(!refresh.is_complete());

        refresh.library_ids.push("1".into());
        refresh.token = None;
        assert!(!refresh.is_complete());

        refresh.token = Some("t".into());
        refresh.enabled = false;
        assert!(!refresh.is_complete());
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "media_root = [").unwrap();
        assert_matches!(load_config(&path), Err(ConfigError::Parse { .. }));
        assert_matches!(
            load_config(&dir.path().join("absent.toml")),
            Err(ConfigError::Read { .. })
        );
    }
}
