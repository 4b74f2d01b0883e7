//! Search path configuration errors

use super::BundleError;

/// Creates a configuration read error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> BundleError {
    BundleError::ConfigReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a configuration parse error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> BundleError {
    BundleError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an executable discovery error
pub fn executable_not_found(reason: impl Into<String>) -> BundleError {
    BundleError::ExecutableNotFound {
        reason: reason.into(),
    }
}

/// Wraps the failure of a required search path entry
pub fn entry_failed(entry: impl Into<String>, source: BundleError) -> BundleError {
    BundleError::EntryFailed {
        entry: entry.into(),
        source: Box::new(source),
    }
}
