// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! OCR provider trait definition

use async_trait::async_trait;
use bytes::Bytes;

#[cfg(test)]
use mockall::automock;

use super::types::OcrError;
use crate::crop::TextLine;

/// Trait for services that recognize text lines in an image.
///
/// Implementations take the raw image bytes and return the recognized
/// lines in reading order (top-to-bottom, page-major), each with its
/// vertical placement. The request handler only depends on this trait so
/// the network client can be swapped out in tests.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait OcrProvider: Send + Sync {
    /// Recognize text lines in the given image bytes.
    async fn read_text(&self, image: Bytes) -> Result<Vec<TextLine>, OcrError>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}
