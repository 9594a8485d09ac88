// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod config;
pub mod crop;
pub mod fetch;
pub mod version;
pub mod vision;

// Re-export main types
pub use api::{start_server, AppState, ProcessImageRequest, ProcessImageResponse};
pub use config::{FetchConfig, NodeConfig, VisionConfig};
pub use crop::{BoundaryResolver, CropRegion, LandmarkPhrases, TextLine};
pub use fetch::{ImageFetcher, ImageSource};
pub use vision::{OcrProvider, ReadClient};
