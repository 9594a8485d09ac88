// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image decoding, cropping, and encoding for the processing pipeline

use std::io::Cursor;

use image::{DynamicImage, ImageFormat};
use thiserror::Error;

use crate::crop::CropRegion;

/// Maximum image size (10MB)
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

/// Custom error types for image processing
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Image data is too large: {0} bytes (max: {1} bytes)")]
    TooLarge(usize, usize),

    #[error("Unsupported image format")]
    UnsupportedFormat,

    #[error("Failed to decode image: {0}")]
    DecodeFailed(String),

    #[error("Image data is empty")]
    EmptyData,

    #[error("Invalid crop region: top={top}, height={height} for image height {image_height}")]
    InvalidCropRegion {
        top: i64,
        height: i64,
        image_height: u32,
    },

    #[error("Failed to encode image: {0}")]
    EncodeFailed(String),
}

/// Image information extracted during loading
#[derive(Debug, Clone)]
pub struct ImageInfo {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Detected format
    pub format: ImageFormat,
    /// Size in bytes
    pub size_bytes: usize,
}

/// Decode raw image bytes fetched from a URL
///
/// # Arguments
/// * `bytes` - Raw image bytes
///
/// # Returns
/// * `Ok((DynamicImage, ImageInfo))` - The decoded image and metadata
/// * `Err(ImageError)` - If decoding fails
pub fn decode_image_bytes(bytes: &[u8]) -> Result<(DynamicImage, ImageInfo), ImageError> {
    // Validate size
    if bytes.len() > MAX_IMAGE_SIZE {
        return Err(ImageError::TooLarge(bytes.len(), MAX_IMAGE_SIZE));
    }

    if bytes.is_empty() {
        return Err(ImageError::EmptyData);
    }

    let format = image::guess_format(bytes).map_err(|_| ImageError::UnsupportedFormat)?;

    let img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| ImageError::DecodeFailed(e.to_string()))?;

    let info = ImageInfo {
        width: img.width(),
        height: img.height(),
        format,
        size_bytes: bytes.len(),
    };

    Ok((img, info))
}

/// Crop a horizontal band out of the image.
///
/// Uses the full image width; only the vertical extent comes from the
/// region. A bottom edge past the image is clamped, but a region whose
/// top lies outside the image or whose height is not positive is
/// rejected so the caller can surface the failure.
pub fn crop_to_region(image: &DynamicImage, region: CropRegion) -> Result<DynamicImage, ImageError> {
    let image_height = image.height();

    if region.top < 0 || region.height < 1 || region.top >= image_height as i64 {
        return Err(ImageError::InvalidCropRegion {
            top: region.top,
            height: region.height,
            image_height,
        });
    }

    let top = region.top as u32;
    let bottom = (region.bottom().min(image_height as i64)) as u32;
    let crop_height = bottom - top;

    Ok(image.crop_imm(0, top, image.width(), crop_height))
}

/// Encode an image as PNG bytes
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, ImageError> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| ImageError::EncodeFailed(e.to_string()))?;
    Ok(buffer.into_inner())
}
