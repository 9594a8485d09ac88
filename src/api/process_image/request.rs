// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Process-image request types and validation

use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;

/// Request for OCR-guided image cropping
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessImageRequest {
    /// URL of the source image to fetch and crop
    #[serde(default)]
    pub image_url: Option<String>,
}

impl ProcessImageRequest {
    /// Validate the process-image request
    pub fn validate(&self) -> Result<(), ApiError> {
        // Validate imageUrl is provided
        if self.image_url.is_none()
            || self.image_url.as_ref().map(|s| s.is_empty()).unwrap_or(true)
        {
            return Err(ApiError::ValidationError {
                field: "imageUrl".to_string(),
                message: "imageUrl is required".to_string(),
            });
        }

        Ok(())
    }
}
