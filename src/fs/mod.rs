//! Directory-backed bundles
//!
//! An [`FsBundle`] exposes the regular files below a native directory.
//! Portable paths are validated and mapped onto the native tree; results
//! are mapped back to portable form.
//!
//! Listing policy: `list` walks the whole tree (following symlinks) in file
//! name order. Entries that can not be read are skipped. A root that does
//! not exist lists as empty; any other failure to read the root is an error.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;
use walkdir::WalkDir;

use crate::bundle::lister::compile_pattern;
use crate::bundle::{Bundle, BundleRef, Lister};
use crate::error::{Result, io_error, not_found};
use crate::path::{check_path, to_native, to_portable};
use crate::resource::{Resource, ResourceInfo, ResourceRef, base_name};

/// A bundle rooted at a directory in the native filesystem
#[derive(Debug, Clone)]
pub struct FsBundle {
    root: Arc<PathBuf>,
}

impl FsBundle {
    /// Open a bundle at a native directory path.
    ///
    /// The directory is not touched until the first lookup, so a bundle
    /// over a missing directory is valid and simply empty. An empty root
    /// means the working directory.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let mut root: PathBuf = root.as_ref().components().collect();
        if root.as_os_str().is_empty() {
            root = PathBuf::from(".");
        }
        Self {
            root: Arc::new(root),
        }
    }

    /// Native root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resource(&self, path: String) -> ResourceRef {
        Arc::new(FsResource {
            path,
            root: Arc::clone(&self.root),
        })
    }

    /// Portable path of a walked entry, if it lies below the root
    fn portable_path(&self, native: &Path) -> Option<String> {
        native
            .strip_prefix(self.root.as_path())
            .ok()
            .and_then(to_portable)
    }

    fn walker(&self) -> WalkDir {
        WalkDir::new(self.root.as_path())
            .follow_links(true)
            .sort_by_file_name()
    }
}

impl fmt::Display for FsBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FsBundle({})", self.root.display())
    }
}

impl Lister for FsBundle {
    fn list(&self) -> Result<Vec<ResourceRef>> {
        let mut resources = Vec::new();

        for entry in self.walker().min_depth(0) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    let err: io::Error = e.into();
                    if err.kind() == io::ErrorKind::NotFound {
                        debug!(root = %self.root.display(), "bundle root does not exist");
                        return Ok(resources);
                    }
                    return Err(io_error(self.root.display().to_string(), err));
                }
                Err(e) => {
                    debug!(root = %self.root.display(), error = %e, "skipping unreadable entry");
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                continue;
            }
            match self.portable_path(entry.path()) {
                Some(path) => resources.push(self.resource(path)),
                None => debug!(path = %entry.path().display(), "skipping non-portable entry"),
            }
        }

        Ok(resources)
    }

    fn into_bundle(self) -> BundleRef {
        Arc::new(self)
    }
}

impl Bundle for FsBundle {
    fn get(&self, path: &str) -> Result<ResourceRef> {
        let path = check_path(path)?;
        if path == "." {
            return Err(not_found(path));
        }

        let native = to_native(&self.root, &path);
        let metadata = match fs::metadata(&native) {
            Ok(metadata) => metadata,
            // A file standing where a directory was expected is a miss too
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
                ) =>
            {
                return Err(not_found(path));
            }
            Err(e) => return Err(io_error(path.as_str(), e)),
        };
        if metadata.is_dir() {
            return Err(not_found(path));
        }

        Ok(self.resource(path))
    }

    fn glob(&self, pattern: &str) -> Result<Vec<ResourceRef>> {
        let compiled = compile_pattern(pattern)?;

        let walker = match compiled.depth() {
            Some(0) => return Ok(Vec::new()),
            Some(depth) => self.walker().min_depth(depth).max_depth(depth),
            None => self.walker().min_depth(1),
        };

        let mut matches = Vec::new();
        for entry in walker.into_iter().filter_map(std::result::Result::ok) {
            if entry.file_type().is_dir() {
                continue;
            }
            let Some(path) = self.portable_path(entry.path()) else {
                continue;
            };
            if !compiled.matches(&path) {
                continue;
            }
            // Re-resolve so a match that vanished or changed kind is dropped
            if let Ok(resource) = self.get(&path) {
                matches.push(resource);
            }
        }

        Ok(matches)
    }
}

/// A file inside an [`FsBundle`]
#[derive(Debug, Clone)]
pub struct FsResource {
    path: String,
    root: Arc<PathBuf>,
}

impl FsResource {
    /// Native path of the file
    pub fn full_path(&self) -> PathBuf {
        to_native(&self.root, &self.path)
    }
}

impl fmt::Display for FsResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FsResource({})", self.path)
    }
}

impl Resource for FsResource {
    fn path(&self) -> &str {
        &self.path
    }

    fn open(&self) -> Result<Box<dyn Read + Send>> {
        let file = File::open(self.full_path()).map_err(|e| io_error(self.path.as_str(), e))?;
        Ok(Box::new(file))
    }

    fn stat(&self) -> Result<ResourceInfo> {
        let metadata = fs::metadata(self.full_path()).map_err(|e| io_error(self.path.as_str(), e))?;
        Ok(ResourceInfo::from_metadata(base_name(&self.path), &metadata))
    }
}
