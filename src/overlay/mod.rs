//! Overlay compositing.
//!
//! The final poster is rebuilt from the cached original on every run by
//! stacking up to three layers, in this order:
//!
//! 1. a static brand overlay image,
//! 2. a pre-rendered TMDB rating badge picked by percent bucket ([`rating`]),
//! 3. a rating box drawn at runtime with a bold font ([`badge`]).
//!
//! A failing layer is recorded in the [`ComposeReport`] and the remaining
//! layers still run; only failing to load the base or to save the result
//! costs the folder its poster.

pub mod badge;
pub mod font;
pub mod rating;

use std::fmt;
use std::path::Path;

use ab_glyph::FontArc;
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{ComposeError, OverlayError};
use crate::images::{encode_jpeg, write_atomic, PosterPaths, FINAL_JPEG_QUALITY};
use crate::metadata::MetadataProvider;
use crate::scanner::MovieFolder;

pub use font::{FileFontLoader, FontLoader};

/// One overlay layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Static,
    CatalogRating,
    RenderedRating,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static => write!(f, "static overlay"),
            Self::CatalogRating => write!(f, "TMDB rating badge"),
            Self::RenderedRating => write!(f, "rendered rating badge"),
        }
    }
}

/// What happened to one layer.
#[derive(Debug)]
pub enum LayerStatus {
    Applied,
    /// Too few votes to trust the rating; nothing drawn.
    BelowThreshold { vote_count: u64, min_vote_count: u64 },
    Failed(OverlayError),
}

/// Per-layer outcomes of one compose, for enabled layers only.
#[derive(Debug, Default)]
pub struct ComposeReport {
    pub layers: Vec<(Layer, LayerStatus)>,
}

impl ComposeReport {
    pub fn status(&self, layer: Layer) -> Option<&LayerStatus> {
        self.layers
            .iter()
            .find(|(l, _)| *l == layer)
            .map(|(_, s)| s)
    }

    pub fn applied(&self, layer: Layer) -> bool {
        matches!(self.status(layer), Some(LayerStatus::Applied))
    }

    pub fn applied_count(&self) -> usize {
        self.layers
            .iter()
            .filter(|(_, s)| matches!(s, LayerStatus::Applied))
            .count()
    }

    fn record(&mut self, layer: Layer, result: Result<LayerStatus, OverlayError>) {
        let status = result.unwrap_or_else(LayerStatus::Failed);
        match &status {
            LayerStatus::Applied => info!("Applied {}", layer),
            LayerStatus::BelowThreshold {
                vote_count,
                min_vote_count,
            } => info!(
                vote_count,
                min_vote_count, "TMDB vote count below threshold, skipping {}", layer
            ),
            LayerStatus::Failed(e) => warn!(error = %e, "Skipping {}", layer),
        }
        self.layers.push((layer, status));
    }
}

/// Builds `poster.jpg` from the cached original and the enabled overlays.
pub struct OverlayCompositor<'a> {
    config: &'a Config,
    metadata: &'a dyn MetadataProvider,
    font: Option<&'a FontArc>,
}

impl<'a> OverlayCompositor<'a> {
    /// `font` must be loaded up front when the rendered badge is enabled.
    pub fn new(
        config: &'a Config,
        metadata: &'a dyn MetadataProvider,
        font: Option<&'a FontArc>,
    ) -> Self {
        Self {
            config,
            metadata,
            font,
        }
    }

    /// Rebuild the folder's final poster. The cached original must exist.
    pub fn compose(&self, folder: &MovieFolder) -> Result<ComposeReport, ComposeError> {
        let paths = PosterPaths::for_folder(&folder.path);
        let mut base = image::open(&paths.cache_file)
            .map_err(|source| ComposeError::BaseImage {
                path: paths.cache_file.clone(),
                source,
            })?
            .to_rgba8();

        let mut report = ComposeReport::default();

        if self.config.static_overlay.enabled {
            let result = self.apply_static(&mut base);
            report.record(Layer::Static, result);
        }
        if self.config.rating_overlay.enabled {
            let result = self.apply_catalog_rating(&mut base, folder.tmdb_id);
            report.record(Layer::CatalogRating, result);
        }
        if self.config.rendered_badge.enabled {
            let result = self.apply_rendered_rating(&mut base, folder.tmdb_id);
            report.record(Layer::RenderedRating, result);
        }

        let flattened = DynamicImage::ImageRgba8(base).to_rgb8();
        let data = encode_jpeg(&flattened, FINAL_JPEG_QUALITY).map_err(ComposeError::Encode)?;
        write_atomic(&paths.final_file, &data).map_err(|source| ComposeError::Save {
            path: paths.final_file.clone(),
            source,
        })?;

        info!(path = %paths.final_file.display(), "Saved final poster");
        Ok(report)
    }

    fn apply_static(&self, base: &mut RgbaImage) -> Result<LayerStatus, OverlayError> {
        composite_file(base, &self.config.static_overlay.path)?;
        Ok(LayerStatus::Applied)
    }

    fn apply_catalog_rating(
        &self,
        base: &mut RgbaImage,
        tmdb_id: u64,
    ) -> Result<LayerStatus, OverlayError> {
        let details = self.metadata.movie_details(tmdb_id)?;
        let min_vote_count = self.config.min_vote_count;
        if !rating::meets_vote_threshold(details.vote_count, min_vote_count) {
            return Ok(LayerStatus::BelowThreshold {
                vote_count: details.vote_count,
                min_vote_count,
            });
        }

        let percent = rating::rating_percent(details.vote_average);
        let asset = rating::badge_asset_path(&self.config.rating_overlay.dir, percent);
        composite_file(base, &asset)?;
        info!(percent, "TMDB rating badge selected");
        Ok(LayerStatus::Applied)
    }

    fn apply_rendered_rating(
        &self,
        base: &mut RgbaImage,
        tmdb_id: u64,
    ) -> Result<LayerStatus, OverlayError> {
        let font = self.font.ok_or(OverlayError::FontNotLoaded)?;
        let details = self.metadata.movie_details(tmdb_id)?;
        badge::render_rating_badge(base, details.vote_average, font);
        info!(rating = %badge::rating_label(details.vote_average), "Rendered rating badge");
        Ok(LayerStatus::Applied)
    }
}

/// Load an overlay image, stretch it to the base size if needed, and
/// alpha-composite it over the whole base.
fn composite_file(base: &mut RgbaImage, path: &Path) -> Result<(), OverlayError> {
    if !path.is_file() {
        return Err(OverlayError::AssetMissing(path.to_path_buf()));
    }

    let mut overlay = image::open(path)
        .map_err(|source| OverlayError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();

    if overlay.dimensions() != base.dimensions() {
        let (w, h) = base.dimensions();
        overlay = imageops::resize(&overlay, w, h, FilterType::Lanczos3);
    }

    imageops::overlay(base, &overlay, 0, 0);
    Ok(())
}
