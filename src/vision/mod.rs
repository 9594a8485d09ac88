// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vision module: remote OCR and local image manipulation
//!
//! This module provides:
//! - Text recognition via the Computer Vision Read API (submit + poll)
//! - Image decode / crop / encode helpers for the processing pipeline

pub mod image_utils;
pub mod provider;
pub mod read_client;
pub mod types;

pub use image_utils::{
    crop_to_region, decode_image_bytes, encode_png, ImageError, ImageInfo, MAX_IMAGE_SIZE,
};
pub use provider::OcrProvider;
pub use read_client::ReadClient;
pub use types::OcrError;
