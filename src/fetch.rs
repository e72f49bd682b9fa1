use anyhow::Result;
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

use crate::error::WatchError;

const USER_AGENT: &str = "jobwatch/0.1 (listing check)";

/// Raw response from the listings page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    /// Hand back the HTML body, or fail unless the status is exactly 200
    pub fn into_html(self, url: &str) -> Result<String> {
        if self.status == 200 {
            Ok(self.body)
        } else {
            Err(WatchError::HttpStatus {
                url: url.to_string(),
                status: self.status,
            }
            .into())
        }
    }
}

/// Anything that can GET a page by URL
pub trait PageSource {
    fn fetch(&self, url: &str) -> Result<FetchedPage>;
}

/// Blocking HTTP page source
pub struct HttpPageSource {
    client: Client,
}

impl HttpPageSource {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WatchError::NetworkError(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl PageSource for HttpPageSource {
    fn fetch(&self, url: &str) -> Result<FetchedPage> {
        debug!("GET {}", url);
        let resp = self
            .client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .send()
            .map_err(|e| WatchError::NetworkError(format!("request failed for {}: {}", url, e)))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .map_err(|e| WatchError::NetworkError(format!("failed reading response for {}: {}", url, e)))?;
        debug!("{} answered {} ({} bytes)", url, status, body.len());

        Ok(FetchedPage { status, body })
    }
}
