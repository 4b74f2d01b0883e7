//! Portable path and glob pattern errors

use super::BundleError;

/// Creates an error for a path that climbs above the bundle root
pub fn escapes_root(path: impl Into<String>) -> BundleError {
    BundleError::EscapesRoot { path: path.into() }
}

/// Creates an error for a rooted or otherwise non-relative path
pub fn not_relative(path: impl Into<String>) -> BundleError {
    BundleError::NotRelative { path: path.into() }
}

/// Creates a malformed glob pattern error
pub fn malformed_pattern(pattern: impl Into<String>, reason: impl ToString) -> BundleError {
    BundleError::MalformedPattern {
        pattern: pattern.into(),
        reason: reason.to_string(),
    }
}
