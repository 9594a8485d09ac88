// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Process-image API endpoint module
//!
//! Provides POST /v1/process-image for OCR-guided image cropping.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::process_image_handler;
pub use request::ProcessImageRequest;
pub use response::{CropMetadata, ProcessImageResponse};
