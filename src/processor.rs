//! Drives one run over the media library: scan, acquire, compose, refresh.

use std::sync::Arc;

use ab_glyph::FontArc;
use tracing::{error, info, info_span, warn};

use crate::config::Config;
use crate::error::{ConfigError, ProcessError};
use crate::http::HttpGet;
use crate::images::{Acquisition, PosterAcquirer, PosterPaths};
use crate::metadata::{MetadataProvider, TmdbClient};
use crate::notifications::{LibraryRefreshNotifier, RefreshReport};
use crate::overlay::{FontLoader, OverlayCompositor};
use crate::restore::RestoreManager;
use crate::scanner::{DirectoryScanner, MovieFolder};

/// Counts reported at the end of a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub found: usize,
    pub processed: usize,
    pub skipped: usize,
    pub restored: usize,
    /// Present when a library refresh was attempted.
    pub refresh: Option<RefreshReport>,
}

/// Sequential library processor.
pub struct Processor<'a> {
    config: &'a Config,
    http: Arc<dyn HttpGet>,
    metadata: Box<dyn MetadataProvider + 'a>,
}

impl<'a> Processor<'a> {
    pub fn new(config: &'a Config, http: Arc<dyn HttpGet>) -> Self {
        let metadata = Box::new(TmdbClient::new(http.clone(), config.api_key.clone()));
        Self {
            config,
            http,
            metadata,
        }
    }

    /// Use a different metadata source than TMDB over `http`.
    pub fn with_metadata(mut self, metadata: Box<dyn MetadataProvider + 'a>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Run in the mode selected by the config.
    ///
    /// Fails only before any folder is touched: a missing media root, or a
    /// missing font when the rendered badge is enabled. Per-folder problems
    /// are logged and counted as skips.
    pub fn run(&self, fonts: &dyn FontLoader) -> Result<RunSummary, ProcessError> {
        if !self.config.media_root.is_dir() {
            return Err(ConfigError::MediaRootNotFound(self.config.media_root.clone()).into());
        }

        if self.config.restore_mode {
            return Ok(self.restore());
        }

        let font = if self.config.rendered_badge.enabled {
            Some(fonts.load(&self.config.rendered_badge.font_path)?)
        } else {
            None
        };

        Ok(self.process_library(font.as_ref()))
    }

    /// Put every cached original back in place, then refresh if enabled.
    pub fn restore(&self) -> RunSummary {
        info!(root = %self.config.media_root.display(), "Restoring original posters");
        let restored = RestoreManager::new(&self.config.media_root).restore_all();
        info!("Restored {} posters", restored);

        RunSummary {
            restored,
            refresh: self.refresh(),
            ..Default::default()
        }
    }

    fn process_library(&self, font: Option<&FontArc>) -> RunSummary {
        let folders = DirectoryScanner::new(&self.config.media_root).scan();
        info!(
            root = %self.config.media_root.display(),
            "Found {} tagged movie folders",
            folders.len()
        );

        let acquirer = PosterAcquirer::new(self.metadata.as_ref(), self.http.clone());
        let compositor = OverlayCompositor::new(self.config, self.metadata.as_ref(), font);

        let mut summary = RunSummary {
            found: folders.len(),
            ..Default::default()
        };

        for folder in &folders {
            let span = info_span!("folder", name = %folder.name(), tmdb_id = folder.tmdb_id);
            let _guard = span.enter();

            if process_folder(&acquirer, &compositor, folder) {
                summary.processed += 1;
            } else {
                summary.skipped += 1;
            }

            if !self.config.request_delay.is_zero() {
                std::thread::sleep(self.config.request_delay);
            }
        }

        info!(
            "Processed {} folders, skipped {}",
            summary.processed, summary.skipped
        );

        summary.refresh = self.refresh();
        summary
    }

    fn refresh(&self) -> Option<RefreshReport> {
        if !self.config.refresh.enabled {
            return None;
        }
        Some(LibraryRefreshNotifier::new(&self.config.refresh, self.http.clone()).notify())
    }
}

/// Returns true when a final poster was written.
fn process_folder(
    acquirer: &PosterAcquirer<'_>,
    compositor: &OverlayCompositor<'_>,
    folder: &MovieFolder,
) -> bool {
    match acquirer.acquire(folder) {
        Ok(Acquisition::AlreadyCached) => info!("Using cached original poster"),
        Ok(Acquisition::Downloaded) => info!("Downloaded and cached original poster"),
        Err(e) => warn!(error = %e, "Skipping folder, could not acquire poster"),
    }

    if !PosterPaths::for_folder(&folder.path).has_cached_original() {
        return false;
    }

    match compositor.compose(folder) {
        Ok(report) => {
            info!(layers = report.applied_count(), "Wrote final poster");
            true
        }
        Err(e) => {
            error!(error = %e, "Failed to build final poster");
            false
        }
    }
}
