// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Landmark phrase configuration
//!
//! The resolver looks for two sets of literal phrases that bracket the
//! content of interest in the source document template. The sets are
//! ordered: earlier phrases take priority over later ones. They are plain
//! configuration data so that template variants can be supported without
//! touching the algorithm.

use std::env;

/// Phrases marking the top edge of the region of interest, in priority order.
const DEFAULT_UPPER_PHRASES: &[&str] = &["Analysez les problèmes", "Analyse des performances"];

/// Phrases marking the bottom edge, in priority order.
const DEFAULT_LOWER_PHRASES: &[&str] = &[
    "STATISTIQUES",
    "Développer la vue",
    "Les valeurs sont estimées",
];

/// Ordered landmark phrase sets injected into the boundary resolver.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkPhrases {
    /// Candidate substrings signaling the start of the region of interest
    pub upper: Vec<String>,
    /// Candidate substrings signaling the end of the region of interest
    pub lower: Vec<String>,
}

impl Default for LandmarkPhrases {
    fn default() -> Self {
        Self {
            upper: DEFAULT_UPPER_PHRASES.iter().map(|s| s.to_string()).collect(),
            lower: DEFAULT_LOWER_PHRASES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl LandmarkPhrases {
    /// Load phrase sets from `CROP_UPPER_PHRASES` / `CROP_LOWER_PHRASES`
    /// (comma-separated). Unset or empty variables keep the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            upper: env::var("CROP_UPPER_PHRASES")
                .ok()
                .map(|v| parse_phrase_list(&v))
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.upper),
            lower: env::var("CROP_LOWER_PHRASES")
                .ok()
                .map(|v| parse_phrase_list(&v))
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.lower),
        }
    }
}

/// Split a comma-separated phrase list, trimming whitespace and dropping
/// empty entries. Order is preserved; it determines match priority.
pub fn parse_phrase_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
