//! Resource handles
//!
//! A **Resource** is a pointer to an unopened file in a bundle. Resources
//! are volatile descriptors: a resource returned by `list` or `glob` only
//! existed when the bundle produced it, and [`Resource::open`] and
//! [`Resource::stat`] are the only operations that check the live state of
//! the underlying storage.
//!
//! Resources only represent files. Directories are never handed out.

mod memory;

pub use memory::MemoryResource;

use std::fmt;
use std::fs::Metadata;
use std::io::Read;
use std::sync::Arc;
use std::time::SystemTime;

use crate::error::Result;

/// A named, readable, non-directory item in a bundle
pub trait Resource: fmt::Debug + Send + Sync {
    /// Portable path identifying this resource within its bundle
    fn path(&self) -> &str;

    /// Open the resource for reading.
    ///
    /// Fails with a not-found error if the item no longer exists. The
    /// returned reader is owned by the caller and released on drop.
    fn open(&self) -> Result<Box<dyn Read + Send>>;

    /// Fetch metadata for the resource from the underlying storage
    fn stat(&self) -> Result<ResourceInfo>;
}

/// Shared handle to a resource, as returned by bundles
pub type ResourceRef = Arc<dyn Resource>;

/// Metadata describing a resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceInfo {
    /// Final path segment
    pub name: String,

    /// Uncompressed size in bytes
    pub size: u64,

    /// Last modification time, if the storage records one
    pub modified: Option<SystemTime>,

    /// Whether the storage reports a directory at this path
    pub is_dir: bool,
}

impl ResourceInfo {
    /// Build resource info from filesystem metadata
    pub fn from_metadata(name: impl Into<String>, metadata: &Metadata) -> Self {
        Self {
            name: name.into(),
            size: metadata.len(),
            modified: metadata.modified().ok(),
            is_dir: metadata.is_dir(),
        }
    }
}

/// Final segment of a portable path
pub fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Open a resource and read its whole content
pub fn read_to_vec(resource: &dyn Resource) -> Result<Vec<u8>> {
    let mut reader = resource.open()?;
    let mut data = Vec::new();
    reader
        .read_to_end(&mut data)
        .map_err(|e| crate::error::io_error(resource.path(), e))?;
    Ok(data)
}
