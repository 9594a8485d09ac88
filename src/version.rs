// Version information for the OCR Crop Node

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-landmark-crop-2026-08-18";

/// Semantic version number
pub const VERSION_NUMBER: &str = "0.1.0";

/// Major version number
pub const VERSION_MAJOR: u32 = 0;

/// Minor version number
pub const VERSION_MINOR: u32 = 1;

/// Patch version number
pub const VERSION_PATCH: u32 = 0;

/// Build date
pub const BUILD_DATE: &str = "2026-08-18";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "read-ocr",
    "landmark-crop",
    "bounded-polling",
    "url-safety",
    "configurable-phrases",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("OCR Crop Node {} ({})", VERSION_NUMBER, BUILD_DATE)
}

/// Get full version info for API responses
pub fn get_version_info() -> serde_json::Value {
    serde_json::json!({
        "version": VERSION_NUMBER,
        "build": VERSION,
        "date": BUILD_DATE,
        "features": FEATURES,
    })
}
