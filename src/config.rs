// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Node configuration loaded from environment variables

use std::env;

use crate::crop::LandmarkPhrases;

/// Configuration for the Read OCR backend
#[derive(Debug, Clone)]
pub struct VisionConfig {
    /// Computer Vision endpoint, e.g. https://<region>.api.cognitive.microsoft.com
    pub endpoint: Option<String>,
    /// Subscription key for the endpoint
    pub api_key: Option<String>,
    /// Delay between polls of the read operation
    pub poll_interval_ms: u64,
    /// Poll budget before giving up on an operation
    pub max_poll_attempts: u32,
    /// Per-request HTTP timeout
    pub request_timeout_secs: u64,
}

impl VisionConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            endpoint: env::var("VISION_ENDPOINT").ok(),
            api_key: env::var("VISION_API_KEY").ok(),
            poll_interval_ms: env::var("VISION_POLL_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            max_poll_attempts: env::var("VISION_MAX_POLL_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            request_timeout_secs: env::var("VISION_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }

    /// Check if both the endpoint and key are present
    pub fn is_configured(&self) -> bool {
        self.endpoint.as_deref().is_some_and(|v| !v.trim().is_empty())
            && self.api_key.as_deref().is_some_and(|v| !v.trim().is_empty())
    }
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            poll_interval_ms: 1000,
            max_poll_attempts: 30,
            request_timeout_secs: 30,
        }
    }
}

/// Configuration for source image fetching
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum accepted body size in bytes
    pub max_image_bytes: usize,
}

impl FetchConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            timeout_secs: env::var("FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            max_image_bytes: env::var("FETCH_MAX_IMAGE_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10 * 1024 * 1024),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_image_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Top-level node configuration
#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub vision: VisionConfig,
    pub fetch: FetchConfig,
    pub phrases: LandmarkPhrases,
    pub api_port: u16,
}

impl NodeConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            vision: VisionConfig::from_env(),
            fetch: FetchConfig::from_env(),
            phrases: LandmarkPhrases::from_env(),
            api_port: env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.vision.poll_interval_ms == 0 {
            return Err("Poll interval must be greater than 0".to_string());
        }
        if self.vision.max_poll_attempts == 0 {
            return Err("Max poll attempts must be greater than 0".to_string());
        }
        if self.vision.endpoint.is_some() != self.vision.api_key.is_some() {
            return Err(
                "VISION_ENDPOINT and VISION_API_KEY must be set together".to_string(),
            );
        }
        if self.fetch.timeout_secs == 0 {
            return Err("Fetch timeout must be greater than 0".to_string());
        }
        if self.fetch.max_image_bytes == 0 {
            return Err("Max image size must be greater than 0".to_string());
        }
        if self.phrases.upper.is_empty() {
            return Err("At least one upper landmark phrase is required".to_string());
        }
        if self.phrases.lower.is_empty() {
            return Err("At least one lower landmark phrase is required".to_string());
        }
        Ok(())
    }

    /// Socket address the API server binds to
    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.api_port)
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            vision: VisionConfig::default(),
            fetch: FetchConfig::default(),
            phrases: LandmarkPhrases::default(),
            api_port: 8080,
        }
    }
}
