//! Zip archive bundles
//!
//! A [`ZipBundle`] exposes the file entries of a zip archive. The archive
//! directory is read once when the bundle is opened and every non-directory
//! entry becomes a resource up front, so `list` is complete and stable for
//! the lifetime of the bundle.
//!
//! Data prepended to the archive, such as an executable image with the
//! archive appended to it, is detected by the zip reader from the central
//! directory offsets.
//!
//! Ownership of the source:
//! - [`ZipBundle::open`] opens the file itself and [`BundleCloser::close`]
//!   releases it.
//! - [`ZipBundle::from_reader`] takes a caller-supplied source. `close` leaves
//!   it alone and [`ZipBundle::into_inner`] hands it back.

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::SystemTime;

use tracing::{debug, warn};
use zip::ZipArchive;

use crate::bundle::lister::{compile_pattern, glob_in};
use crate::bundle::{Bundle, BundleCloser, BundleRef, Lister};
use crate::error::archive::read_failed;
use crate::error::{BundleError, Result, io_error, not_found};
use crate::path::check_path;
use crate::resource::{Resource, ResourceInfo, ResourceRef, base_name};

/// Shared state between a bundle and the resources it handed out
struct ArchiveState<R> {
    name: String,
    archive: Mutex<Option<ZipArchive<R>>>,
    owns_source: bool,
}

impl<R> ArchiveState<R> {
    fn lock(&self) -> MutexGuard<'_, Option<ZipArchive<R>>> {
        self.archive.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<R> fmt::Debug for ArchiveState<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiveState")
            .field("name", &self.name)
            .field("owns_source", &self.owns_source)
            .finish_non_exhaustive()
    }
}

/// A bundle over the entries of a zip archive
pub struct ZipBundle<R = File> {
    state: Arc<ArchiveState<R>>,
    resources: Vec<ResourceRef>,
    index: HashMap<String, usize>,
}

impl ZipBundle<File> {
    /// Open the archive at a native path.
    ///
    /// The bundle owns the file and releases it on [`close`](BundleCloser::close)
    /// or drop.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let file = File::open(path).map_err(|e| io_error(name.as_str(), e))?;
        Self::load(file, name, true)
    }
}

impl<R> ZipBundle<R>
where
    R: Read + Seek + Send + 'static,
{
    /// Read an archive from a caller-supplied source.
    ///
    /// The source is never closed by the bundle; get it back with
    /// [`into_inner`](Self::into_inner).
    pub fn from_reader(reader: R) -> Result<Self> {
        Self::load(reader, "<reader>".to_string(), false)
    }

    fn load(reader: R, name: String, owns_source: bool) -> Result<Self> {
        let archive = ZipArchive::new(reader).map_err(|e| read_failed(name.as_str(), e))?;
        if archive.offset() > 0 {
            debug!(archive = %name, offset = archive.offset(), "archive starts after prepended data");
        }
        Self::from_archive(archive, name, owns_source)
    }

    fn from_archive(mut archive: ZipArchive<R>, name: String, owns_source: bool) -> Result<Self> {
        let mut entries = Vec::with_capacity(archive.len());
        for position in 0..archive.len() {
            let file = archive
                .by_index_raw(position)
                .map_err(|e| read_failed(name.as_str(), e))?;
            if file.is_dir() {
                continue;
            }
            let path = match check_path(file.name()) {
                Ok(path) => path,
                Err(e) => {
                    warn!(archive = %name, entry = file.name(), error = %e, "skipping unsafe archive entry");
                    continue;
                }
            };
            entries.push(EntryMeta {
                path,
                position,
                size: file.size(),
                modified: file.last_modified().and_then(dos_to_system_time),
            });
        }

        let state = Arc::new(ArchiveState {
            name,
            archive: Mutex::new(Some(archive)),
            owns_source,
        });

        let mut resources: Vec<ResourceRef> = Vec::with_capacity(entries.len());
        let mut index = HashMap::with_capacity(entries.len());
        for entry in entries {
            if index.contains_key(&entry.path) {
                continue;
            }
            index.insert(entry.path.clone(), resources.len());
            resources.push(Arc::new(ZipResource {
                meta: entry,
                state: Arc::clone(&state),
            }));
        }

        debug!(archive = %state.name, resources = resources.len(), "opened zip bundle");
        Ok(Self {
            state,
            resources,
            index,
        })
    }

    /// Give back a caller-supplied source.
    ///
    /// Returns `None` for bundles that opened their own file, after the
    /// source was released, or while resources from this bundle are still
    /// alive.
    pub fn into_inner(self) -> Option<R> {
        if self.state.owns_source {
            return None;
        }
        let Self { state, resources, .. } = self;
        drop(resources);
        let state = Arc::try_unwrap(state).ok()?;
        let archive = state
            .archive
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)?;
        Some(archive.into_inner())
    }
}

impl<R> fmt::Debug for ZipBundle<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZipBundle")
            .field("name", &self.state.name)
            .field("resources", &self.resources.len())
            .finish()
    }
}

impl<R> fmt::Display for ZipBundle<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ZipBundle({})", self.state.name)
    }
}

impl<R> Lister for ZipBundle<R>
where
    R: Read + Seek + Send + 'static,
{
    fn list(&self) -> Result<Vec<ResourceRef>> {
        Ok(self.resources.clone())
    }

    fn into_bundle(self) -> BundleRef {
        Arc::new(self)
    }
}

impl<R> Bundle for ZipBundle<R>
where
    R: Read + Seek + Send + 'static,
{
    fn get(&self, path: &str) -> Result<ResourceRef> {
        let path = check_path(path)?;
        self.index
            .get(&path)
            .map(|&position| Arc::clone(&self.resources[position]))
            .ok_or_else(|| not_found(path))
    }

    fn glob(&self, pattern: &str) -> Result<Vec<ResourceRef>> {
        let compiled = compile_pattern(pattern)?;
        Ok(glob_in(self.resources.clone(), &compiled))
    }
}

impl<R> BundleCloser for ZipBundle<R>
where
    R: Read + Seek + Send + 'static,
{
    fn close(&self) -> Result<()> {
        if self.state.owns_source {
            let released = self.state.lock().take();
            if released.is_some() {
                debug!(archive = %self.state.name, "released archive source");
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct EntryMeta {
    path: String,
    position: usize,
    size: u64,
    modified: Option<SystemTime>,
}

/// A file entry inside a [`ZipBundle`]
pub struct ZipResource<R> {
    meta: EntryMeta,
    state: Arc<ArchiveState<R>>,
}

impl<R> fmt::Debug for ZipResource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZipResource")
            .field("archive", &self.state.name)
            .field("path", &self.meta.path)
            .finish()
    }
}

impl<R> Resource for ZipResource<R>
where
    R: Read + Seek + Send + 'static,
{
    fn path(&self) -> &str {
        &self.meta.path
    }

    fn open(&self) -> Result<Box<dyn Read + Send>> {
        let mut guard = self.state.lock();
        let archive = guard.as_mut().ok_or(BundleError::Closed)?;
        let mut file = archive
            .by_index(self.meta.position)
            .map_err(|e| read_failed(self.meta.path.as_str(), e))?;

        let capacity = usize::try_from(self.meta.size).unwrap_or(0);
        let mut data = Vec::with_capacity(capacity);
        file.read_to_end(&mut data)
            .map_err(|e| io_error(self.meta.path.as_str(), e))?;
        Ok(Box::new(Cursor::new(data)))
    }

    fn stat(&self) -> Result<ResourceInfo> {
        if self.state.lock().is_none() {
            return Err(BundleError::Closed);
        }
        Ok(ResourceInfo {
            name: base_name(&self.meta.path).to_string(),
            size: self.meta.size,
            modified: self.meta.modified,
            is_dir: false,
        })
    }
}

/// Convert an archive timestamp (local DOS time, read as UTC) to `SystemTime`
fn dos_to_system_time(stamp: zip::DateTime) -> Option<SystemTime> {
    chrono::NaiveDateTime::try_from(stamp)
        .ok()
        .map(|time| time.and_utc().into())
}
