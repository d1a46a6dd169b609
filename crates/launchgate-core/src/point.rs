//! Point normalization.
//!
//! Two points are the same destination when their absolute strings match
//! after trailing `/` characters are stripped. Stripping never reduces a
//! string below one character, so `"/"` stays `"/"`.

use url::Url;

/// Strip trailing `/` characters, keeping at least one character.
pub fn normalize_str(value: &str) -> &str {
    let mut trimmed = value;
    while trimmed.len() > 1 && trimmed.ends_with('/') {
        trimmed = &trimmed[..trimmed.len() - 1];
    }
    trimmed
}

/// Comparison form of a point: its absolute string without trailing slashes.
pub fn normalize(point: &Url) -> String {
    normalize_str(point.as_str()).to_string()
}

/// Whether two points name the same destination after normalization.
pub fn same_point(a: &Url, b: &Url) -> bool {
    normalize_str(a.as_str()) == normalize_str(b.as_str())
}

/// Normalize a point reported by the embedded surface.
///
/// Only http(s) points are touched, and only their path: trailing slashes are
/// removed while the path is longer than one character. Every other scheme
/// passes through unchanged.
pub fn normalize_observed(point: Url) -> Url {
    if !matches!(point.scheme(), "http" | "https") {
        return point;
    }

    let path = point.path();
    if path.len() <= 1 || !path.ends_with('/') {
        return point;
    }

    let trimmed = normalize_str(path).to_string();
    let mut normalized = point;
    normalized.set_path(&trimmed);
    normalized
}
