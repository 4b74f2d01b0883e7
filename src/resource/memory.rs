//! In-memory resources

use std::io::{Cursor, Read};
use std::sync::Arc;
use std::time::SystemTime;

use super::{Resource, ResourceInfo, ResourceRef, base_name};
use crate::error::Result;

/// A resource whose content lives in memory
///
/// Useful for building list-backed bundles with [`open_list`](crate::bundle::open_list).
#[derive(Debug, Clone)]
pub struct MemoryResource {
    path: String,
    data: Arc<[u8]>,
    modified: Option<SystemTime>,
}

impl MemoryResource {
    /// Create a resource at a portable path with the given content
    pub fn new(path: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            data: Arc::from(data.into()),
            modified: None,
        }
    }

    /// Create a shared resource handle
    pub fn shared(path: impl Into<String>, data: impl Into<Vec<u8>>) -> ResourceRef {
        Arc::new(Self::new(path, data))
    }

    /// Record a modification time
    #[must_use]
    pub fn with_modified(mut self, modified: SystemTime) -> Self {
        self.modified = Some(modified);
        self
    }
}

impl Resource for MemoryResource {
    fn path(&self) -> &str {
        &self.path
    }

    fn open(&self) -> Result<Box<dyn Read + Send>> {
        Ok(Box::new(Cursor::new(Arc::clone(&self.data))))
    }

    fn stat(&self) -> Result<ResourceInfo> {
        Ok(ResourceInfo {
            name: base_name(&self.path).to_string(),
            size: self.data.len() as u64,
            modified: self.modified,
            is_dir: false,
        })
    }
}
