pub mod plex;

pub use plex::PlexClient;

use crate::config::RefreshConfig;
use crate::http::HttpGet;
use std::sync::Arc;

/// Outcome of one refresh pass, by library section ID.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RefreshReport {
    pub succeeded: Vec<String>,
    pub failed: Vec<String>,
}

/// Asks the media server to rescan each configured library section.
pub struct LibraryRefreshNotifier<'a> {
    config: &'a RefreshConfig,
    http: Arc<dyn HttpGet>,
}

impl<'a> LibraryRefreshNotifier<'a> {
    pub fn new(config: &'a RefreshConfig, http: Arc<dyn HttpGet>) -> Self {
        Self { config, http }
    }

    /// Refresh every configured section.
    /// This method is best-effort - errors are logged but not propagated, and
    /// one failed section does not stop the others.
    pub fn notify(&self) -> RefreshReport {
        let mut report = RefreshReport::default();

        let (true, Some(host), Some(port), Some(token)) = (
            self.config.is_complete(),
            self.config.host.as_deref(),
            self.config.port,
            self.config.token.as_deref(),
        ) else {
            tracing::warn!("Plex refresh settings are incomplete, skipping library refresh");
            return report;
        };

        tracing::info!("Triggering Plex library refresh");
        let client = PlexClient::new(self.http.clone(), host, port, token);

        for section_id in &self.config.library_ids {
            match client.refresh_section(section_id) {
                Ok(()) => {
                    tracing::info!("Plex refresh initiated for section {}", section_id);
                    report.succeeded.push(section_id.clone());
                }
                Err(e) => {
                    tracing::warn!("Failed to refresh Plex section {}: {}", section_id, e);
                    report.failed.push(section_id.clone());
                }
            }
        }

        report
    }
}
