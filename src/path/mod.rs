//! Portable path handling
//!
//! Portable paths are UNIX style: relative, separated by forward slashes,
//! no drive letters and no backslashes. Every bundle accepts and produces
//! paths in this form regardless of the host conventions.
//!
//! This module provides:
//! - Lexical normalization ([`clean`]) with POSIX semantics
//! - Validation against the bundle root ([`check_path`])
//! - Symmetric translation to and from native paths ([`to_native`], [`to_portable`])
//! - Compiled glob patterns over portable paths ([`GlobPattern`])

mod glob;

pub use glob::GlobPattern;

use std::path::{Component, Path, PathBuf};

use crate::error::Result;
use crate::error::path::{escapes_root, not_relative};

/// Lexically normalize a portable path.
///
/// Collapses repeated separators, drops `.` segments and resolves `..`
/// against the preceding segment. Leading `..` segments of a relative path
/// are kept; a rooted path can not climb above `/`. The empty path cleans
/// to `.`.
pub fn clean(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if rooted => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Validate a portable path and return its normalized form.
///
/// Fails with `NotRelative` for rooted paths and for paths holding a `\`
/// or `:` anywhere (native separators, drive prefixes and alternate data
/// streams), and with `EscapesRoot` when normalization leaves a leading
/// `..` segment.
///
/// ```
/// use resbundle::path::check_path;
///
/// assert_eq!(check_path("a/b/../c").unwrap(), "a/c");
/// assert!(check_path("../secret").is_err());
/// ```
pub fn check_path(path: &str) -> Result<String> {
    if path.starts_with('/') || path.contains(['\\', ':']) {
        return Err(not_relative(path));
    }

    let cleaned = clean(path);
    if cleaned == ".." || cleaned.starts_with("../") {
        return Err(escapes_root(path));
    }

    Ok(cleaned)
}

/// Map a normalized portable path below `root` to a native path
pub fn to_native(root: &Path, portable: &str) -> PathBuf {
    let mut native = root.to_path_buf();
    for segment in portable.split('/').filter(|s| !s.is_empty() && *s != ".") {
        native.push(segment);
    }
    native
}

/// Convert a native path relative to a bundle root back to portable form.
///
/// Returns `None` if the path is not a plain relative path (rooted, has a
/// prefix or parent components), is not valid UTF-8, or has a name that
/// [`check_path`] would refuse.
pub fn to_portable(relative: &Path) -> Option<String> {
    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(name) => {
                let name = name.to_str()?;
                if name.contains(['\\', ':']) {
                    return None;
                }
                segments.push(name);
            }
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    if segments.is_empty() {
        return None;
    }
    Some(segments.join("/"))
}
