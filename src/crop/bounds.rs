// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Landmark-anchored boundary resolution
//!
//! Given the recognized text lines of a document image, decide the vertical
//! window to crop. The algorithm is a heuristic for a known document
//! template: one phrase set brackets the top of the content of interest,
//! another brackets the bottom. When a landmark is missing (OCR miss,
//! phrase rewording, rotated source) the bound degrades to a fixed
//! percentage of the image height instead of failing.

use tracing::{debug, warn};

use super::phrases::LandmarkPhrases;
use super::region::{CropRegion, TextLine};

/// Default upper bound when no upper phrase matches.
const UPPER_FALLBACK_RATIO: f64 = 0.15;

/// Default lower bound when no lower phrase matches, also the repair value
/// applied by the consistency guard.
const LOWER_FALLBACK_RATIO: f64 = 0.85;

/// Lower-phrase matches are only accepted below this fraction of the image;
/// the footer text the lower phrases describe lives in the bottom 30%, and
/// the cutoff avoids an incidental match higher up on the page.
const LOWER_ZONE_RATIO: f64 = 0.7;

/// Fixed offset past the matched lower line, clearing the text itself and
/// its trailing content.
const LOWER_OFFSET_PX: f64 = 200.0;

/// Resolves a crop window from recognized text lines.
///
/// Pure and total: any input produces a region, never an error. Identical
/// input always yields an identical region.
#[derive(Debug, Clone)]
pub struct BoundaryResolver {
    phrases: LandmarkPhrases,
}

impl Default for BoundaryResolver {
    fn default() -> Self {
        Self::new(LandmarkPhrases::default())
    }
}

impl BoundaryResolver {
    pub fn new(phrases: LandmarkPhrases) -> Self {
        Self { phrases }
    }

    /// Resolve the crop window for an image of the given height.
    ///
    /// `lines` must be in OCR reading order (top-to-bottom, page-major);
    /// it may be empty, in which case the window spans the fallback 15%-85%
    /// band of the image.
    pub fn resolve(&self, lines: &[TextLine], image_height: f64) -> CropRegion {
        let upper = self.find_upper_bound(lines);
        let lower = self.find_lower_bound(lines, image_height);

        let upper = upper.unwrap_or_else(|| {
            warn!("no upper landmark matched, defaulting to 15% of height");
            image_height * UPPER_FALLBACK_RATIO
        });
        let mut lower = lower.unwrap_or_else(|| {
            warn!("no lower landmark matched, defaulting to 85% of height");
            image_height * LOWER_FALLBACK_RATIO
        });

        // Consistency guard, deliberately asymmetric: only the lower bound
        // is repaired. An anomalously large upper bound survives and can
        // still produce a negative-height region; that case is surfaced to
        // the caller rather than papered over here.
        if lower <= upper {
            warn!(
                "lower bound {:.1} not below upper bound {:.1}, resetting lower to 85% of height",
                lower, upper
            );
            lower = image_height * LOWER_FALLBACK_RATIO;
        }

        let top = upper.round() as i64;
        let bottom = lower.round() as i64;
        CropRegion {
            top,
            height: bottom - top,
        }
    }

    /// First upper phrase (priority order) contained in any line wins; the
    /// matched line's top edge is the raw bound.
    fn find_upper_bound(&self, lines: &[TextLine]) -> Option<f64> {
        for phrase in &self.phrases.upper {
            if let Some(line) = lines.iter().find(|l| l.text.contains(phrase.as_str())) {
                debug!("upper landmark '{}' matched at y={:.1}", phrase, line.y);
                return Some(line.y);
            }
        }
        None
    }

    /// Like the upper search, but restricted to lines in the bottom zone of
    /// the image; the raw bound sits a fixed offset below the matched line.
    fn find_lower_bound(&self, lines: &[TextLine], image_height: f64) -> Option<f64> {
        let zone_start = image_height * LOWER_ZONE_RATIO;
        let candidates: Vec<&TextLine> = lines.iter().filter(|l| l.y > zone_start).collect();

        for phrase in &self.phrases.lower {
            if let Some(line) = candidates.iter().find(|l| l.text.contains(phrase.as_str())) {
                debug!("lower landmark '{}' matched at y={:.1}", phrase, line.y);
                return Some(line.y + LOWER_OFFSET_PX);
            }
        }
        None
    }
}
