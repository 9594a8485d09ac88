// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Read API client for text recognition
//!
//! Submits image bytes to the Computer Vision Read endpoint and polls the
//! returned operation location until the analysis reaches a terminal
//! status. The original service polled forever; this client bounds the
//! loop with a configurable attempt budget and reports a `failed` analysis
//! as its own error instead of spinning on it.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::provider::OcrProvider;
use super::types::OcrError;
use crate::config::VisionConfig;
use crate::crop::TextLine;

const READ_ANALYZE_PATH: &str = "/vision/v3.2/read/analyze";
const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const OPERATION_LOCATION_HEADER: &str = "Operation-Location";

const STATUS_SUCCEEDED: &str = "succeeded";
const STATUS_FAILED: &str = "failed";

/// Client for the Computer Vision Read API (v3.2).
pub struct ReadClient {
    client: Client,
    endpoint: String,
    api_key: String,
    poll_interval: Duration,
    max_poll_attempts: u32,
}

impl ReadClient {
    /// Build a client from configuration. Returns `None` when the endpoint
    /// or API key is missing, in which case requests needing OCR must be
    /// rejected by the caller.
    pub fn from_config(config: &VisionConfig) -> Option<Self> {
        let endpoint = config.endpoint.as_deref()?.trim();
        let api_key = config.api_key.as_deref()?.trim();
        if endpoint.is_empty() || api_key.is_empty() {
            return None;
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        let endpoint = endpoint.trim_end_matches('/').to_string();
        info!("Read OCR client configured: endpoint={}", endpoint);

        Some(Self {
            client,
            endpoint,
            api_key: api_key.to_string(),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            max_poll_attempts: config.max_poll_attempts,
        })
    }

    /// Submit image bytes for analysis, returning the operation URL to poll.
    async fn submit(&self, image: Bytes) -> Result<String, OcrError> {
        let url = format!("{}{}", self.endpoint, READ_ANALYZE_PATH);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/octet-stream")
            .header(SUBSCRIPTION_KEY_HEADER, &self.api_key)
            .body(image)
            .send()
            .await
            .map_err(|e| OcrError::SubmitFailed {
                status: 0,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(OcrError::SubmitFailed {
                status: status.as_u16(),
                message,
            });
        }

        response
            .headers()
            .get(OPERATION_LOCATION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
            .ok_or(OcrError::MissingOperationLocation)
    }

    /// Poll the operation URL until the analysis succeeds, fails, or the
    /// attempt budget runs out. Mirrors the original cadence: wait one
    /// interval first, then check.
    async fn poll(&self, operation_url: &str) -> Result<Vec<TextLine>, OcrError> {
        let mut attempts = 0u32;

        loop {
            tokio::time::sleep(self.poll_interval).await;
            attempts += 1;

            let response = self
                .client
                .get(operation_url)
                .header(SUBSCRIPTION_KEY_HEADER, &self.api_key)
                .send()
                .await
                .map_err(|e| OcrError::PollFailed(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(OcrError::PollFailed(format!("HTTP {}", status.as_u16())));
            }

            let operation: ReadOperation = response
                .json()
                .await
                .map_err(|e| OcrError::InvalidResponse(e.to_string()))?;

            match operation.status.as_str() {
                STATUS_SUCCEEDED => {
                    debug!("read analysis succeeded after {} poll(s)", attempts);
                    return Ok(collect_text_lines(operation));
                }
                STATUS_FAILED => {
                    warn!("read analysis reported failed status");
                    return Err(OcrError::AnalysisFailed);
                }
                other => {
                    if attempts >= self.max_poll_attempts {
                        return Err(OcrError::PollTimeout { attempts });
                    }
                    debug!(
                        "read analysis status '{}', attempt {}/{}",
                        other, attempts, self.max_poll_attempts
                    );
                }
            }
        }
    }
}

#[async_trait]
impl OcrProvider for ReadClient {
    async fn read_text(&self, image: Bytes) -> Result<Vec<TextLine>, OcrError> {
        let start = Instant::now();

        let operation_url = self.submit(image).await?;
        debug!("read analysis submitted, polling {}", operation_url);

        let lines = self.poll(&operation_url).await?;
        info!(
            "OCR complete: {} lines in {}ms",
            lines.len(),
            start.elapsed().as_millis()
        );

        Ok(lines)
    }

    fn name(&self) -> &'static str {
        "read-v3.2"
    }
}

// --- Read API wire format ---

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReadOperation {
    status: String,
    analyze_result: Option<AnalyzeResult>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeResult {
    #[serde(default)]
    read_results: Vec<ReadPage>,
}

#[derive(Debug, serde::Deserialize)]
struct ReadPage {
    #[serde(default)]
    lines: Vec<ReadLine>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReadLine {
    text: String,
    /// Four x,y corner pairs: top-left, top-right, bottom-right, bottom-left
    #[serde(default)]
    bounding_box: Vec<f64>,
}

/// Flatten the page/line hierarchy into `TextLine`s in reading order.
/// `y` is the polygon's top-left y; `height` is bottom-left y minus
/// top-left y. Lines with a truncated polygon are skipped.
fn collect_text_lines(operation: ReadOperation) -> Vec<TextLine> {
    let mut lines = Vec::new();
    let Some(analyze_result) = operation.analyze_result else {
        return lines;
    };

    for page in analyze_result.read_results {
        for line in page.lines {
            if line.bounding_box.len() < 8 {
                debug!("skipping line with truncated bounding box: '{}'", line.text);
                continue;
            }
            let y = line.bounding_box[1];
            let height = line.bounding_box[7] - line.bounding_box[1];
            lines.push(TextLine {
                text: line.text,
                y,
                height,
            });
        }
    }

    lines
}
