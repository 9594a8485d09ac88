// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Process-image response types

use serde::{Deserialize, Serialize};

/// Dimensions and resolved bounds for a completed crop
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropMetadata {
    /// Source image width in pixels
    pub original_width: u32,
    /// Source image height in pixels
    pub original_height: u32,
    /// Cropped image width in pixels
    pub cropped_width: u32,
    /// Cropped image height in pixels
    pub cropped_height: u32,
    /// Resolved top edge of the crop band
    pub upper_bound: i64,
    /// Resolved bottom edge of the crop band
    pub lower_bound: i64,
}

/// Response from image processing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessImageResponse {
    /// Cropped image encoded as base64 PNG
    pub processed_image: String,
    /// Dimensions and resolved bounds
    pub metadata: CropMetadata,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

impl ProcessImageResponse {
    pub fn new(processed_image: String, metadata: CropMetadata, processing_time_ms: u64) -> Self {
        Self {
            processed_image,
            metadata,
            processing_time_ms,
        }
    }
}
