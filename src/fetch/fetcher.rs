//! HTTP image fetching with URL safety checks and size limits
//!
//! Downloads the source image named in a processing request. Only
//! public http/https URLs are allowed; loopback, private, and
//! link-local targets are rejected before any request is made.

use async_trait::async_trait;
use bytes::Bytes;
#[cfg(test)]
use mockall::automock;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};
use url::{Host, Url};

use crate::config::FetchConfig;

/// Image fetch error types
#[derive(Debug, Clone)]
pub enum FetchError {
    /// Request timed out
    Timeout(String),
    /// HTTP request error
    HttpError(String),
    /// HTTP non-success status
    HttpStatus(u16, String),
    /// URL is unsafe (localhost, private IP)
    UnsafeUrl(String),
    /// Body exceeds the configured size limit
    TooLarge(usize, usize),
    /// Response body was empty
    EmptyBody(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout(url) => write!(f, "Timeout fetching: {}", url),
            Self::HttpError(msg) => write!(f, "HTTP error: {}", msg),
            Self::HttpStatus(code, url) => write!(f, "HTTP {} for: {}", code, url),
            Self::UnsafeUrl(url) => write!(f, "Unsafe URL blocked: {}", url),
            Self::TooLarge(size, max) => {
                write!(f, "Image too large: {} bytes (max: {} bytes)", size, max)
            }
            Self::EmptyBody(url) => write!(f, "Empty response body from: {}", url),
        }
    }
}

impl std::error::Error for FetchError {}

/// Source of raw image bytes, keyed by URL
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn fetch_image(&self, url: &str) -> Result<Bytes, FetchError>;
}

/// HTTP image fetcher
pub struct ImageFetcher {
    client: Client,
    config: FetchConfig,
}

impl ImageFetcher {
    /// Create a new image fetcher
    pub fn new(config: FetchConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("Mozilla/5.0 (compatible; OcrCropBot/1.0)")
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Check if URL is safe to fetch (not localhost/private IP)
    pub fn is_safe_url(url: &str) -> bool {
        let parsed = match Url::parse(url) {
            Ok(u) => u,
            Err(_) => return false,
        };

        // Only allow http/https
        if !["http", "https"].contains(&parsed.scheme()) {
            return false;
        }

        match parsed.host() {
            Some(Host::Domain(domain)) => !domain.eq_ignore_ascii_case("localhost"),
            Some(Host::Ipv4(ip)) => {
                !(ip.is_loopback()
                    || ip.is_private()
                    || ip.is_link_local()
                    || ip.is_unspecified())
            }
            Some(Host::Ipv6(ip)) => {
                !(ip.is_loopback()
                    || ip.is_unspecified()
                    || ip.is_unique_local()
                    || ip.is_unicast_link_local())
            }
            None => false,
        }
    }
}

#[async_trait]
impl ImageSource for ImageFetcher {
    async fn fetch_image(&self, url: &str) -> Result<Bytes, FetchError> {
        // Validate URL safety
        if !Self::is_safe_url(url) {
            return Err(FetchError::UnsafeUrl(url.to_string()));
        }

        debug!("Fetching image from: {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(url.to_string())
            } else {
                FetchError::HttpError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16(), url.to_string()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::HttpError(e.to_string()))?;

        if bytes.is_empty() {
            return Err(FetchError::EmptyBody(url.to_string()));
        }

        if bytes.len() > self.config.max_image_bytes {
            return Err(FetchError::TooLarge(bytes.len(), self.config.max_image_bytes));
        }

        info!("Fetched {} bytes from: {}", bytes.len(), url);

        Ok(bytes)
    }
}
