// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Process-image endpoint handler

use axum::{extract::State, http::StatusCode, Json};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::time::Instant;
use tracing::{debug, info, warn};

use super::request::ProcessImageRequest;
use super::response::{CropMetadata, ProcessImageResponse};
use crate::api::errors::{error_response, ApiError, ErrorResponse};
use crate::api::http_server::AppState;
use crate::fetch::FetchError;
use crate::vision::{crop_to_region, decode_image_bytes, encode_png, OcrError};

/// POST /v1/process-image - Crop an image around OCR-detected landmarks
///
/// Fetches the image at `imageUrl`, runs text recognition on it, resolves
/// a vertical crop band from the recognized landmark phrases, and returns
/// the cropped image as base64 PNG together with the resolved bounds.
///
/// # Request
/// - `imageUrl`: URL of the source image (required)
///
/// # Response
/// - `processedImage`: Cropped image as base64-encoded PNG
/// - `metadata`: Original/cropped dimensions and the resolved bounds
/// - `processingTimeMs`: Processing time in milliseconds
///
/// # Errors
/// - 400 Bad Request: Missing imageUrl or blocked URL
/// - 500 Internal Server Error: OCR not configured, fetch/OCR/crop failure
/// - 504 Gateway Timeout: Text recognition did not finish in the poll budget
pub async fn process_image_handler(
    State(state): State<AppState>,
    Json(request): Json<ProcessImageRequest>,
) -> Result<Json<ProcessImageResponse>, (StatusCode, Json<ErrorResponse>)> {
    let start = Instant::now();

    // 1. Validate request
    if let Err(e) = request.validate() {
        warn!("Process-image validation failed: {}", e);
        return Err(error_response(&e));
    }
    let image_url = request.image_url.as_deref().unwrap_or_default();

    // 2. OCR backend must be configured
    let ocr = state.ocr.as_ref().ok_or_else(|| {
        warn!("Process-image request rejected: OCR backend not configured");
        error_response(&ApiError::NotConfigured(
            "OCR service is not configured".to_string(),
        ))
    })?;

    // 3. Fetch the source image
    let bytes = state.fetcher.fetch_image(image_url).await.map_err(|e| {
        warn!("Image fetch failed: {}", e);
        match e {
            FetchError::UnsafeUrl(_) => error_response(&ApiError::InvalidRequest(e.to_string())),
            _ => error_response(&ApiError::UpstreamError(e.to_string())),
        }
    })?;

    // 4. Decode to get dimensions
    let (image, image_info) = decode_image_bytes(&bytes).map_err(|e| {
        warn!("Failed to decode fetched image: {}", e);
        error_response(&ApiError::UpstreamError(format!("Invalid image: {}", e)))
    })?;

    debug!(
        "Decoded image: {}x{}, {} bytes",
        image_info.width, image_info.height, image_info.size_bytes
    );

    // 5. Run text recognition
    let lines = ocr.read_text(bytes).await.map_err(|e| {
        warn!("Text recognition failed: {}", e);
        match e {
            OcrError::PollTimeout { .. } => error_response(&ApiError::Timeout),
            _ => error_response(&ApiError::UpstreamError(e.to_string())),
        }
    })?;

    // 6. Resolve the crop band from recognized lines
    let region = state.resolver.resolve(&lines, image_info.height as f64);
    debug!(
        "Resolved crop region: top={}, height={}",
        region.top, region.height
    );

    // 7. Crop and re-encode as PNG
    let cropped = crop_to_region(&image, region).map_err(|e| {
        warn!("Crop failed: {}", e);
        error_response(&ApiError::InternalError(e.to_string()))
    })?;

    let png = encode_png(&cropped).map_err(|e| {
        warn!("PNG encoding failed: {}", e);
        error_response(&ApiError::InternalError(e.to_string()))
    })?;

    let processed_image = STANDARD.encode(&png);
    let processing_time_ms = start.elapsed().as_millis() as u64;

    info!(
        "Processed image: {}x{} -> {}x{}, bounds {}..{}, {}ms",
        image_info.width,
        image_info.height,
        cropped.width(),
        cropped.height(),
        region.top,
        region.bottom(),
        processing_time_ms
    );

    let metadata = CropMetadata {
        original_width: image_info.width,
        original_height: image_info.height,
        cropped_width: cropped.width(),
        cropped_height: cropped.height(),
        upper_bound: region.top,
        lower_bound: region.bottom(),
    };

    Ok(Json(ProcessImageResponse::new(
        processed_image,
        metadata,
        processing_time_ms,
    )))
}
