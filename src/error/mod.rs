//! Error types and handling for resbundle
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`path`]: Portable path and glob pattern errors
//! - [`archive`]: Zip archive errors
//! - [`config`]: Search path configuration errors

pub mod archive;
pub mod config;
pub mod path;

#[cfg(test)]
mod tests;

use std::fmt;
use std::io;

use miette::Diagnostic;
use thiserror::Error;

/// Bundle operation that produced an annotated error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Get,
    Glob,
    List,
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Op::Get => "get",
            Op::Glob => "glob",
            Op::List => "list",
        };
        f.write_str(name)
    }
}

/// Main error type for bundle operations
#[derive(Error, Diagnostic, Debug)]
pub enum BundleError {
    // Lookup errors
    #[error("resource not found: {path}")]
    #[diagnostic(code(resbundle::lookup::not_found))]
    NotFound { path: String },

    #[error("path escapes bundle root: {path}")]
    #[diagnostic(
        code(resbundle::path::escapes_root),
        help("Portable paths may not climb above the bundle root with '..'")
    )]
    EscapesRoot { path: String },

    #[error("path is not relative: {path}")]
    #[diagnostic(
        code(resbundle::path::not_relative),
        help("Portable paths are forward-slash separated and relative, e.g. 'images/logo.png'")
    )]
    NotRelative { path: String },

    #[error("malformed glob pattern '{pattern}': {reason}")]
    #[diagnostic(
        code(resbundle::pattern::malformed),
        help("Supported wildcards: '*', '?' and bracket classes like '[a-z]'")
    )]
    MalformedPattern { pattern: String, reason: String },

    // Storage errors
    #[error("I/O error on '{path}': {source}")]
    #[diagnostic(code(resbundle::fs::io_error))]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to read archive '{path}': {source}")]
    #[diagnostic(code(resbundle::archive::read_failed))]
    Archive {
        path: String,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("bundle is closed")]
    #[diagnostic(code(resbundle::archive::closed))]
    Closed,

    // Sequence errors
    #[error("{op} {path}: {source}")]
    #[diagnostic(code(resbundle::sequence::failed))]
    Op {
        op: Op,
        path: String,
        #[source]
        source: Box<BundleError>,
    },

    // Configuration errors
    #[error("cannot locate the running executable: {reason}")]
    #[diagnostic(code(resbundle::config::executable_not_found))]
    ExecutableNotFound { reason: String },

    #[error("failed to read search path configuration: {path}")]
    #[diagnostic(code(resbundle::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("failed to parse search path configuration: {path}: {reason}")]
    #[diagnostic(code(resbundle::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("search path entry could not be opened: {entry}")]
    #[diagnostic(
        code(resbundle::config::entry_failed),
        help("Mark the entry as `optional: true` to skip it when it is missing")
    )]
    EntryFailed {
        entry: String,
        #[source]
        source: Box<BundleError>,
    },
}

impl BundleError {
    /// Wrap this error with the failing operation and its path or pattern.
    ///
    /// An error already annotated with the same operation and path is
    /// returned unchanged.
    #[must_use]
    pub fn annotate(self, op: Op, path: impl Into<String>) -> Self {
        let path = path.into();
        if let BundleError::Op {
            op: existing_op,
            path: existing_path,
            ..
        } = &self
        {
            if *existing_op == op && *existing_path == path {
                return self;
            }
        }
        BundleError::Op {
            op,
            path,
            source: Box::new(self),
        }
    }

    /// Returns true if the error reports that a resource could not be found,
    /// looking through any annotation layers.
    pub fn is_not_found(&self) -> bool {
        match self {
            BundleError::NotFound { .. } => true,
            BundleError::Io { source, .. } => source.kind() == io::ErrorKind::NotFound,
            BundleError::Archive { source, .. } => {
                matches!(source, zip::result::ZipError::FileNotFound)
            }
            BundleError::Op { source, .. } | BundleError::EntryFailed { source, .. } => {
                source.is_not_found()
            }
            _ => false,
        }
    }
}

/// Creates a not found error
pub fn not_found(path: impl Into<String>) -> BundleError {
    BundleError::NotFound { path: path.into() }
}

/// Creates an I/O error for a path
pub fn io_error(path: impl Into<String>, source: io::Error) -> BundleError {
    BundleError::Io {
        path: path.into(),
        source,
    }
}

/// Returns true if any error in the chain reports a missing resource.
///
/// Works for any error type: each link of the `source()` chain is checked
/// for a [`BundleError`] or an [`io::Error`] of kind `NotFound`.
pub fn is_not_found(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(err) = current {
        if let Some(bundle_err) = err.downcast_ref::<BundleError>() {
            if bundle_err.is_not_found() {
                return true;
            }
        } else if let Some(io_err) = err.downcast_ref::<io::Error>() {
            if io_err.kind() == io::ErrorKind::NotFound {
                return true;
            }
        }
        current = err.source();
    }
    false
}

impl From<BundleError> for io::Error {
    fn from(err: BundleError) -> Self {
        let kind = if err.is_not_found() {
            io::ErrorKind::NotFound
        } else {
            io::ErrorKind::Other
        };
        io::Error::new(kind, err)
    }
}

/// Result type alias for bundle operations
pub type Result<T> = std::result::Result<T, BundleError>;
