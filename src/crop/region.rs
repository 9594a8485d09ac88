// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core data types for boundary resolution

/// A single line of recognized text with its vertical placement.
///
/// Derived from an OCR line record: `y` is the bounding polygon's
/// top-left y coordinate, `height` is bottom-left y minus top-left y.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    /// Recognized text content
    pub text: String,
    /// Top edge in pixels
    pub y: f64,
    /// Line height in pixels
    pub height: f64,
}

impl TextLine {
    pub fn new(text: impl Into<String>, y: f64, height: f64) -> Self {
        Self {
            text: text.into(),
            y,
            height,
        }
    }
}

/// Vertical crop window produced by the boundary resolver.
///
/// `top` is always non-negative. `height` is usually positive but the
/// resolver does not guarantee it (see the consistency guard notes in
/// `bounds.rs`); callers that hand this to the codec must expect a
/// degenerate region to be rejected there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    /// Top offset in pixels
    pub top: i64,
    /// Window height in pixels
    pub height: i64,
}

impl CropRegion {
    /// Bottom edge of the window (`top + height`), i.e. the rounded
    /// lower bound the resolver computed.
    pub fn bottom(&self) -> i64 {
        self.top + self.height
    }
}
