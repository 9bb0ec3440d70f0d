//! Configuration precedence tests: flags over environment over file.
//!
//! These set process environment variables, so each runs under `#[serial]`.

use clap::Parser;
use posterforge::config::{self, FileConfig, Overrides};
use serial_test::serial;
use std::path::Path;
use std::time::Duration;

#[derive(Parser)]
struct TestCli {
    #[command(flatten)]
    overrides: Overrides,
}

const ENV_VARS: &[&str] = &[
    "TMDB_API_KEY",
    "MEDIA_ROOT",
    "RESTORE_MODE",
    "MIN_VOTE_COUNT",
    "REQUEST_DELAY_MS",
    "APPLY_STATIC_OVERLAY",
    "APPLY_TMDB_RATING",
    "APPLY_IMDB_RATING",
    "PLEX_REFRESH",
    "PLEX_IP",
    "PLEX_PORT",
    "PLEX_TOKEN",
    "PLEX_LIBRARY_ID",
];

fn clear_env() {
    for var in ENV_VARS {
        std::env::remove_var(var);
    }
}

fn parse(args: &[&str]) -> Overrides {
    let mut argv = vec!["posterforge"];
    argv.extend_from_slice(args);
    TestCli::parse_from(argv).overrides
}

fn root_arg(root: &Path) -> String {
    root.to_string_lossy().into_owned()
}

#[test]
#[serial]
fn env_vars_feed_config() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    std::env::set_var("TMDB_API_KEY", "env-key");
    std::env::set_var("MEDIA_ROOT", dir.path());
    std::env::set_var("MIN_VOTE_COUNT", "250");
    std::env::set_var("APPLY_TMDB_RATING", "true");
    std::env::set_var("APPLY_STATIC_OVERLAY", "false");
    std::env::set_var("PLEX_REFRESH", "yes");
    std::env::set_var("PLEX_IP", "192.168.1.20");
    std::env::set_var("PLEX_PORT", "32400");
    std::env::set_var("PLEX_TOKEN", "tok");
    std::env::set_var("PLEX_LIBRARY_ID", "1, 4 ,,");

    let config = config::resolve(FileConfig::default(), &parse(&[])).unwrap();
    clear_env();

    assert_eq!(config.api_key, "env-key");
    assert_eq!(config.media_root, dir.path());
    assert_eq!(config.min_vote_count, 250);
    assert!(config.rating_overlay.enabled);
    assert!(!config.static_overlay.enabled);
    assert!(config.refresh.enabled);
    assert_eq!(config.refresh.library_ids, vec!["1", "4"]);
    assert!(config.refresh.is_complete());
}

#[test]
#[serial]
fn flags_override_env() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    std::env::set_var("TMDB_API_KEY", "env-key");
    std::env::set_var("MIN_VOTE_COUNT", "250");
    std::env::set_var("APPLY_IMDB_RATING", "true");

    let root = root_arg(dir.path());
    let overrides = parse(&[
        "--api-key",
        "flag-key",
        "--media-root",
        &root,
        "--min-vote-count",
        "900",
        "--apply-imdb-rating",
        "false",
        "--restore-mode",
    ]);
    let config = config::resolve(FileConfig::default(), &overrides).unwrap();
    clear_env();

    assert_eq!(config.api_key, "flag-key");
    assert_eq!(config.min_vote_count, 900);
    assert!(!config.rendered_badge.enabled);
    assert!(config.restore_mode);
}

#[test]
#[serial]
fn env_overrides_file() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("posterforge.toml");
    std::fs::write(
        &path,
        format!(
            r#"
media_root = {root:?}
request_delay_ms = 1500

[tmdb]
api_key = "file-key"
min_vote_count = 100

[overlays.rating]
enabled = true
dir = "/srv/badges"
"#,
            root = dir.path()
        ),
    )
    .unwrap();
    std::env::set_var("MIN_VOTE_COUNT", "300");

    let file = config::load_config_or_default(Some(&path)).unwrap();
    let config = config::resolve(file, &parse(&[])).unwrap();
    clear_env();

    assert_eq!(config.api_key, "file-key");
    assert_eq!(config.media_root, dir.path());
    assert_eq!(config.min_vote_count, 300);
    assert_eq!(config.request_delay, Duration::from_millis(1500));
    assert!(config.rating_overlay.enabled);
    assert_eq!(config.rating_overlay.dir, Path::new("/srv/badges"));
}

#[test]
#[serial]
fn unrecognized_switch_values_disable_features() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    std::env::set_var("TMDB_API_KEY", "env-key");
    std::env::set_var("MEDIA_ROOT", dir.path());
    std::env::set_var("APPLY_STATIC_OVERLAY", "enabled");
    std::env::set_var("RESTORE_MODE", "maybe");
    std::env::set_var("APPLY_TMDB_RATING", "TRUE");

    let overrides = TestCli::try_parse_from(["posterforge"]).map(|cli| cli.overrides);
    clear_env();

    let config = config::resolve(FileConfig::default(), &overrides.unwrap()).unwrap();
    assert!(!config.static_overlay.enabled);
    assert!(!config.restore_mode);
    assert!(config.rating_overlay.enabled);
}

#[test]
#[serial]
fn blank_env_api_key_rejected() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    std::env::set_var("TMDB_API_KEY", "  ");
    std::env::set_var("MEDIA_ROOT", dir.path());

    let result = config::resolve(FileConfig::default(), &parse(&[]));
    clear_env();

    assert!(matches!(
        result,
        Err(posterforge::error::ConfigError::MissingApiKey)
    ));
}
