// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error types for the OCR collaborator

use thiserror::Error;

/// Errors that can occur while submitting an image to the text reading
/// service or polling for its result.
#[derive(Debug, Error)]
pub enum OcrError {
    /// HTTP-level failure while submitting the image
    #[error("OCR submit failed: {status} - {message}")]
    SubmitFailed {
        /// HTTP status code (0 when the request never completed)
        status: u16,
        /// Error message or response body
        message: String,
    },

    /// Submit was accepted but the result location header is missing
    #[error("OCR submit response carried no operation location")]
    MissingOperationLocation,

    /// HTTP-level failure while polling for the result
    #[error("OCR poll failed: {0}")]
    PollFailed(String),

    /// The service reported a terminal failed status for the analysis
    #[error("OCR analysis failed on the service side")]
    AnalysisFailed,

    /// The analysis did not reach a terminal status within the attempt budget
    #[error("OCR result not ready after {attempts} poll attempts")]
    PollTimeout {
        /// Poll attempts made before giving up
        attempts: u32,
    },

    /// The polling response could not be parsed
    #[error("invalid OCR response: {0}")]
    InvalidResponse(String),
}
