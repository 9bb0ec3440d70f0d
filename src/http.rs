//! Blocking HTTP GET capability.
//!
//! Every network call goes through [`HttpGet`] so that the pipeline can be
//! exercised without a network in tests.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::HttpError;

/// Issue a GET request and return the response body on a 2xx status.
pub trait HttpGet: Send + Sync {
    fn get(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, HttpError>;
}

/// [`HttpGet`] backed by a shared `reqwest` blocking client.
pub struct ReqwestHttp {
    client: Client,
}

impl ReqwestHttp {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent(concat!("posterforge/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client: {}", e);
                Client::new()
            });

        Self { client }
    }
}

impl Default for ReqwestHttp {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpGet for ReqwestHttp {
    fn get(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, HttpError> {
        let response = self.client.get(url).timeout(timeout).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Status(status.as_u16()));
        }

        Ok(response.bytes()?.to_vec())
    }
}
