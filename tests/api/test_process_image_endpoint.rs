// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Endpoint tests for POST /v1/process-image
//!
//! These tests drive the process_image_handler directly with stubbed
//! image sources and OCR providers, covering:
//! - Request validation and error statuses
//! - The full fetch -> OCR -> resolve -> crop -> encode pipeline
//! - Fallback bounds when no landmark phrase is recognized
//! - Degenerate crop regions surfaced as internal errors

use async_trait::async_trait;
use axum::{extract::State, http::StatusCode, Json};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use std::sync::Arc;

use ocr_crop_node::api::http_server::AppState;
use ocr_crop_node::api::process_image::ProcessImageRequest;
use ocr_crop_node::crop::{BoundaryResolver, TextLine};
use ocr_crop_node::fetch::{FetchError, ImageSource};
use ocr_crop_node::vision::{OcrError, OcrProvider};

/// Image source that always returns the same bytes
struct StaticImageSource {
    bytes: Bytes,
}

#[async_trait]
impl ImageSource for StaticImageSource {
    async fn fetch_image(&self, url: &str) -> Result<Bytes, FetchError> {
        // Keep the handler's own safety check meaningful for localhost tests
        if !ocr_crop_node::fetch::ImageFetcher::is_safe_url(url) {
            return Err(FetchError::UnsafeUrl(url.to_string()));
        }
        Ok(self.bytes.clone())
    }
}

/// Image source that always fails with an HTTP status
struct FailingImageSource;

#[async_trait]
impl ImageSource for FailingImageSource {
    async fn fetch_image(&self, url: &str) -> Result<Bytes, FetchError> {
        Err(FetchError::HttpStatus(404, url.to_string()))
    }
}

/// OCR provider returning a fixed set of recognized lines
struct StubOcr {
    lines: Vec<TextLine>,
}

#[async_trait]
impl OcrProvider for StubOcr {
    async fn read_text(&self, _image: Bytes) -> Result<Vec<TextLine>, OcrError> {
        Ok(self.lines.clone())
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// OCR provider that exhausts its poll budget
struct TimedOutOcr;

#[async_trait]
impl OcrProvider for TimedOutOcr {
    async fn read_text(&self, _image: Bytes) -> Result<Vec<TextLine>, OcrError> {
        Err(OcrError::PollTimeout { attempts: 30 })
    }

    fn name(&self) -> &'static str {
        "timed-out"
    }
}

/// OCR provider whose analysis reports a failed status
struct FailedOcr;

#[async_trait]
impl OcrProvider for FailedOcr {
    async fn read_text(&self, _image: Bytes) -> Result<Vec<TextLine>, OcrError> {
        Err(OcrError::AnalysisFailed)
    }

    fn name(&self) -> &'static str {
        "failed"
    }
}

/// Helper: encode a blank RGB image of the given size as PNG bytes
fn png_image_bytes(width: u32, height: u32) -> Bytes {
    let img = image::DynamicImage::new_rgb8(width, height);
    let mut buffer = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buffer, image::ImageFormat::Png)
        .expect("failed to encode test image");
    Bytes::from(buffer.into_inner())
}

/// Helper: build AppState from a stub source and optional OCR provider
fn test_state(fetcher: Arc<dyn ImageSource>, ocr: Option<Arc<dyn OcrProvider>>) -> AppState {
    AppState {
        fetcher,
        ocr,
        resolver: Arc::new(BoundaryResolver::default()),
    }
}

fn request_for(url: &str) -> ProcessImageRequest {
    ProcessImageRequest {
        image_url: Some(url.to_string()),
    }
}

#[cfg(test)]
mod process_image_handler_tests {
    use super::*;
    use ocr_crop_node::api::process_image::process_image_handler;

    // =========================================================================
    // Request Validation Tests
    // =========================================================================

    /// Test 1: Validation error when imageUrl is missing
    #[tokio::test]
    async fn test_validation_error_missing_image_url() {
        let state = test_state(
            Arc::new(FailingImageSource),
            Some(Arc::new(StubOcr { lines: vec![] })),
        );

        let request = ProcessImageRequest { image_url: None };
        let result = process_image_handler(State(state), Json(request)).await;

        assert!(result.is_err(), "Should fail when imageUrl is missing");
        let (status, Json(body)) = result.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error_type, "validation_error");
        assert!(body.message.contains("imageUrl"));
    }

    /// Test 2: Validation error when imageUrl is empty
    #[tokio::test]
    async fn test_validation_error_empty_image_url() {
        let state = test_state(
            Arc::new(FailingImageSource),
            Some(Arc::new(StubOcr { lines: vec![] })),
        );

        let result = process_image_handler(State(state), Json(request_for(""))).await;

        assert!(result.is_err(), "Should fail when imageUrl is empty");
        let (status, _body) = result.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    // =========================================================================
    // Service Availability Tests
    // =========================================================================

    /// Test 3: Internal error when OCR credentials are not configured
    #[tokio::test]
    async fn test_error_when_ocr_not_configured() {
        let state = test_state(
            Arc::new(StaticImageSource {
                bytes: png_image_bytes(2, 10),
            }),
            None,
        );

        let result =
            process_image_handler(State(state), Json(request_for("https://example.com/a.png")))
                .await;

        assert!(result.is_err(), "Should fail without OCR credentials");
        let (status, Json(body)) = result.unwrap_err();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error_type, "not_configured");
    }

    /// Test 4: Blocked URL is rejected as a bad request
    #[tokio::test]
    async fn test_unsafe_url_rejected() {
        let state = test_state(
            Arc::new(StaticImageSource {
                bytes: png_image_bytes(2, 10),
            }),
            Some(Arc::new(StubOcr { lines: vec![] })),
        );

        let result =
            process_image_handler(State(state), Json(request_for("http://localhost/a.png"))).await;

        assert!(result.is_err(), "Should reject localhost URLs");
        let (status, Json(body)) = result.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error_type, "invalid_request");
    }

    // =========================================================================
    // Pipeline Tests
    // =========================================================================

    /// Test 5: Landmark crop with an upper match and lower fallback
    ///
    /// Upper phrase recognized at y=100; the lower phrase sits above the
    /// lower search zone, so the bottom falls back to 85% of the height.
    #[tokio::test]
    async fn test_crop_with_upper_match_and_lower_fallback() {
        let lines = vec![
            TextLine::new("Analyse des performances", 100.0, 20.0),
            TextLine::new("STATISTIQUES", 650.0, 30.0),
        ];
        let state = test_state(
            Arc::new(StaticImageSource {
                bytes: png_image_bytes(200, 1000),
            }),
            Some(Arc::new(StubOcr { lines })),
        );

        let result = process_image_handler(
            State(state),
            Json(request_for("https://example.com/report.png")),
        )
        .await;

        assert!(result.is_ok(), "Pipeline should succeed: {:?}", result.err());
        let response = result.unwrap().0;

        assert_eq!(response.metadata.original_width, 200);
        assert_eq!(response.metadata.original_height, 1000);
        assert_eq!(response.metadata.upper_bound, 100);
        assert_eq!(response.metadata.lower_bound, 850);
        assert_eq!(response.metadata.cropped_width, 200);
        assert_eq!(response.metadata.cropped_height, 750);

        // The returned payload is a decodable PNG with the cropped dimensions
        let png = STANDARD
            .decode(&response.processed_image)
            .expect("processedImage should be valid base64");
        let cropped = image::load_from_memory(&png).expect("payload should be a decodable image");
        assert_eq!(cropped.width(), 200);
        assert_eq!(cropped.height(), 750);
    }

    /// Test 6: Lower landmark inside the search zone sets the bottom edge
    #[tokio::test]
    async fn test_crop_with_both_landmarks_matched() {
        let lines = vec![
            TextLine::new("Analysez les problèmes de performances", 120.0, 18.0),
            TextLine::new("Les valeurs sont estimées", 720.0, 16.0),
        ];
        let state = test_state(
            Arc::new(StaticImageSource {
                bytes: png_image_bytes(64, 1000),
            }),
            Some(Arc::new(StubOcr { lines })),
        );

        let result = process_image_handler(
            State(state),
            Json(request_for("https://example.com/report.png")),
        )
        .await;

        assert!(result.is_ok(), "Pipeline should succeed: {:?}", result.err());
        let response = result.unwrap().0;

        // Lower bound is the matched line plus the fixed 200px margin
        assert_eq!(response.metadata.upper_bound, 120);
        assert_eq!(response.metadata.lower_bound, 920);
        assert_eq!(response.metadata.cropped_height, 800);
    }

    /// Test 7: No recognized text falls back to the 15%..85% band
    #[tokio::test]
    async fn test_crop_fallback_band_when_no_text() {
        let state = test_state(
            Arc::new(StaticImageSource {
                bytes: png_image_bytes(32, 1000),
            }),
            Some(Arc::new(StubOcr { lines: vec![] })),
        );

        let result = process_image_handler(
            State(state),
            Json(request_for("https://example.com/blank.png")),
        )
        .await;

        assert!(result.is_ok(), "Fallback crop should succeed: {:?}", result.err());
        let response = result.unwrap().0;

        assert_eq!(response.metadata.upper_bound, 150);
        assert_eq!(response.metadata.lower_bound, 850);
        assert_eq!(response.metadata.cropped_height, 700);
    }

    /// Test 8: A band extending past the image bottom is clamped in the
    /// output while the metadata keeps the computed bounds
    #[tokio::test]
    async fn test_crop_clamped_at_bottom_keeps_computed_bounds() {
        let lines = vec![TextLine::new("STATISTIQUES détaillées", 900.0, 20.0)];
        let state = test_state(
            Arc::new(StaticImageSource {
                bytes: png_image_bytes(32, 1000),
            }),
            Some(Arc::new(StubOcr { lines })),
        );

        let result = process_image_handler(
            State(state),
            Json(request_for("https://example.com/footer.png")),
        )
        .await;

        assert!(result.is_ok(), "Clamped crop should succeed: {:?}", result.err());
        let response = result.unwrap().0;

        // No upper match, so 15% fallback; the matched lower line plus the
        // fixed margin lands past the image bottom and is reported as-is.
        assert_eq!(response.metadata.upper_bound, 150);
        assert_eq!(response.metadata.lower_bound, 1100);
        // The returned image stops at the real bottom edge.
        assert_eq!(response.metadata.cropped_height, 850);

        let png = STANDARD
            .decode(&response.processed_image)
            .expect("processedImage should be valid base64");
        let cropped = image::load_from_memory(&png).expect("payload should be a decodable image");
        assert_eq!(cropped.width(), 32);
        assert_eq!(cropped.height(), 850);
    }

    /// Test 9: A degenerate region (bounds inverted near the bottom edge)
    /// surfaces as an internal error instead of a panic
    #[tokio::test]
    async fn test_degenerate_region_is_internal_error() {
        let lines = vec![
            TextLine::new("Analyse des performances", 950.0, 12.0),
            TextLine::new("STATISTIQUES", 701.0, 12.0),
        ];
        let state = test_state(
            Arc::new(StaticImageSource {
                bytes: png_image_bytes(32, 1000),
            }),
            Some(Arc::new(StubOcr { lines })),
        );

        let result = process_image_handler(
            State(state),
            Json(request_for("https://example.com/odd.png")),
        )
        .await;

        assert!(result.is_err(), "Degenerate region should not succeed");
        let (status, Json(body)) = result.unwrap_err();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error_type, "internal_error");
    }

    // =========================================================================
    // Upstream Failure Tests
    // =========================================================================

    /// Test 10: Fetch failure maps to an upstream error
    #[tokio::test]
    async fn test_fetch_failure_is_upstream_error() {
        let state = test_state(
            Arc::new(FailingImageSource),
            Some(Arc::new(StubOcr { lines: vec![] })),
        );

        let result = process_image_handler(
            State(state),
            Json(request_for("https://example.com/missing.png")),
        )
        .await;

        assert!(result.is_err());
        let (status, Json(body)) = result.unwrap_err();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error_type, "upstream_error");
    }

    /// Test 11: Non-image bytes from the source map to an upstream error
    #[tokio::test]
    async fn test_non_image_bytes_is_upstream_error() {
        let state = test_state(
            Arc::new(StaticImageSource {
                bytes: Bytes::from_static(b"this is not an image"),
            }),
            Some(Arc::new(StubOcr { lines: vec![] })),
        );

        let result = process_image_handler(
            State(state),
            Json(request_for("https://example.com/not-image.txt")),
        )
        .await;

        assert!(result.is_err());
        let (status, Json(body)) = result.unwrap_err();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error_type, "upstream_error");
        assert!(body.message.contains("Invalid image"));
    }

    /// Test 12: Exhausted poll budget maps to a gateway timeout
    #[tokio::test]
    async fn test_poll_timeout_is_gateway_timeout() {
        let state = test_state(
            Arc::new(StaticImageSource {
                bytes: png_image_bytes(2, 10),
            }),
            Some(Arc::new(TimedOutOcr)),
        );

        let result =
            process_image_handler(State(state), Json(request_for("https://example.com/a.png")))
                .await;

        assert!(result.is_err());
        let (status, Json(body)) = result.unwrap_err();
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body.error_type, "timeout");
    }

    /// Test 13: Failed analysis maps to an upstream error
    #[tokio::test]
    async fn test_failed_analysis_is_upstream_error() {
        let state = test_state(
            Arc::new(StaticImageSource {
                bytes: png_image_bytes(2, 10),
            }),
            Some(Arc::new(FailedOcr)),
        );

        let result =
            process_image_handler(State(state), Json(request_for("https://example.com/a.png")))
                .await;

        assert!(result.is_err());
        let (status, Json(body)) = result.unwrap_err();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error_type, "upstream_error");
    }
}
