use std::sync::Arc;
use std::time::Duration;

use crate::error::HttpError;
use crate::http::HttpGet;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Minimal Plex Media Server client: library section refresh only.
pub struct PlexClient {
    http: Arc<dyn HttpGet>,
    base_url: String,
    token: String,
}

impl PlexClient {
    pub fn new(http: Arc<dyn HttpGet>, host: &str, port: u16, token: &str) -> Self {
        Self {
            http,
            base_url: format!("http://{host}:{port}"),
            token: token.to_string(),
        }
    }

    fn refresh_url(&self, section_id: &str) -> String {
        format!(
            "{}/library/sections/{}/refresh?X-Plex-Token={}",
            self.base_url, section_id, self.token
        )
    }

    /// Ask Plex to rescan one library section.
    pub fn refresh_section(&self, section_id: &str) -> Result<(), HttpError> {
        self.http
            .get(&self.refresh_url(section_id), REQUEST_TIMEOUT)
            .map(|_| ())
    }
}
