//! Error types used throughout posterforge.
//!
//! Errors are split by blast radius: [`ConfigError`] and [`FontError`] abort
//! the whole run, [`AcquireError`] and [`ComposeError`] skip one folder,
//! [`OverlayError`] skips one layer, and [`HttpError`] on a refresh target
//! skips that target only.

use std::path::PathBuf;

/// A failed HTTP GET.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// Connection, timeout, or body read failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("unexpected HTTP status {0}")]
    Status(u16),
}

/// Fatal configuration problems detected before any folder is processed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("TMDB API key is not set (TMDB_API_KEY)")]
    MissingApiKey,

    #[error("media root {0} does not exist or is not a directory")]
    MediaRootNotFound(PathBuf),

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// The rendered rating badge cannot be drawn without its font.
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("font {path} could not be read: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("font {0} is not a valid TrueType/OpenType font")]
    Invalid(PathBuf),
}

/// Failure to fetch a movie's metadata record.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("TMDB detail request for {id} failed: {source}")]
    Request {
        id: u64,
        #[source]
        source: HttpError,
    },

    #[error("TMDB detail response for {id} could not be decoded: {source}")]
    Decode {
        id: u64,
        #[source]
        source: serde_json::Error,
    },
}

/// Reasons the original poster could not be cached for a folder.
#[derive(Debug, thiserror::Error)]
pub enum AcquireError {
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error("TMDB has no poster for ID {0}")]
    NoPosterPath(u64),

    #[error("poster download from {url} failed: {source}")]
    Download {
        url: String,
        #[source]
        source: HttpError,
    },

    #[error("downloaded poster could not be decoded: {0}")]
    Decode(#[source] image::ImageError),

    #[error("failed to encode poster: {0}")]
    Encode(#[source] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of one overlay layer. Never aborts the folder.
#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    #[error("overlay asset not found: {0}")]
    AssetMissing(PathBuf),

    #[error("overlay asset {path} could not be loaded: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error("rendered badge requested but no font was loaded")]
    FontNotLoaded,
}

/// Failures that prevent the final poster from being produced.
#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    #[error("could not load base image {path}: {source}")]
    BaseImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to encode final poster: {0}")]
    Encode(#[source] image::ImageError),

    #[error("failed to save final poster {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Run-level error returned by the processor. Only fatal conditions reach it.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Font(#[from] FontError),
}
