use std::fs::File;
use std::time::Duration;

use url::Url;

use crate::{StoreError, StoreResult};

/// Configuration for outbound HTTP.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Per-request timeout.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: concat!("heliospice/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

/// Blocking HTTP client shared by directory scraping and kernel download.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::blocking::Client,
}

impl HttpClient {
    pub fn new(config: HttpConfig) -> Self {
        let inner = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()
            .expect("build http client");
        Self { inner }
    }

    /// GET a page and return its body as text.
    pub fn get_text(&self, url: &Url) -> StoreResult<String> {
        let response = self
            .inner
            .get(url.clone())
            .send()
            .map_err(|e| network_error(url, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                url: url.to_string(),
                status,
            });
        }
        response.text().map_err(|e| network_error(url, e))
    }

    /// GET a file, streaming the body into `dest`. Returns bytes written.
    pub fn download(&self, url: &Url, dest: &mut File) -> StoreResult<u64> {
        let mut response = self
            .inner
            .get(url.clone())
            .send()
            .map_err(|e| network_error(url, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                url: url.to_string(),
                status,
            });
        }
        response.copy_to(dest).map_err(|e| network_error(url, e))
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new(HttpConfig::default())
    }
}

fn network_error(url: &Url, err: reqwest::Error) -> StoreError {
    StoreError::Network {
        url: url.to_string(),
        source: err,
    }
}
