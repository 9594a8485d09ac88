// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Boundary resolution core
//!
//! Turns recognized text lines into a vertical crop window by matching
//! landmark phrases, with deterministic percentage fallbacks. Pure logic;
//! the OCR and codec collaborators live in `crate::vision`.

pub mod bounds;
pub mod phrases;
pub mod region;

pub use bounds::BoundaryResolver;
pub use phrases::LandmarkPhrases;
pub use region::{CropRegion, TextLine};
