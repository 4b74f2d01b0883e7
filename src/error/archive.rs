//! Zip archive errors

use zip::result::ZipError;

use super::BundleError;

/// Creates an archive read error
pub fn read_failed(path: impl Into<String>, source: ZipError) -> BundleError {
    BundleError::Archive {
        path: path.into(),
        source,
    }
}
