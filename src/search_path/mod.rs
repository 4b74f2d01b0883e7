//! Search path configuration
//!
//! A search path is an ordered list of places to look for resources. It is
//! built into a [`BundleSequence`], so earlier entries shadow later ones.
//!
//! Configuration is YAML:
//!
//! ```yaml
//! search_path:
//!   - type: fs
//!     path: assets
//!   - type: zip
//!     path: assets.zip
//!     optional: true
//!   - type: working_dir
//!   - type: exe_dir
//!   - type: exe_zip
//!     optional: true
//! ```
//!
//! Relative paths resolve against the directory of the configuration file,
//! or against the working directory when the configuration did not come
//! from a file.

use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::archive::ZipBundle;
use crate::bundle::{BundleRef, BundleSequence, Lister};
use crate::error::config::{entry_failed, executable_not_found, parse_failed, read_failed};
use crate::error::{Result, io_error};
use crate::fs::FsBundle;

/// Environment variable naming the package directory during development
pub const MANIFEST_DIR_VAR: &str = "CARGO_MANIFEST_DIR";

/// One place to look for resources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchPathEntry {
    /// A directory
    Fs {
        path: PathBuf,
        #[serde(default, skip_serializing_if = "is_false")]
        optional: bool,
    },
    /// A zip archive file
    Zip {
        path: PathBuf,
        #[serde(default, skip_serializing_if = "is_false")]
        optional: bool,
    },
    /// The process working directory
    WorkingDir,
    /// The directory holding the running executable, or a directory below it
    ExeDir {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path: Option<PathBuf>,
        #[serde(default, skip_serializing_if = "is_false")]
        optional: bool,
    },
    /// A zip archive appended to the running executable
    ExeZip {
        #[serde(default, skip_serializing_if = "is_false")]
        optional: bool,
    },
    /// The package directory named by `CARGO_MANIFEST_DIR`, or a directory below it
    ManifestDir {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path: Option<PathBuf>,
        #[serde(default, skip_serializing_if = "is_false")]
        optional: bool,
    },
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

impl SearchPathEntry {
    /// Whether a failure to open this entry is skipped instead of reported
    pub fn is_optional(&self) -> bool {
        match self {
            Self::Fs { optional, .. }
            | Self::Zip { optional, .. }
            | Self::ExeDir { optional, .. }
            | Self::ExeZip { optional }
            | Self::ManifestDir { optional, .. } => *optional,
            Self::WorkingDir => false,
        }
    }
}

impl fmt::Display for SearchPathEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fs { path, .. } => write!(f, "fs {}", path.display()),
            Self::Zip { path, .. } => write!(f, "zip {}", path.display()),
            Self::WorkingDir => f.write_str("working_dir"),
            Self::ExeDir { path: None, .. } => f.write_str("exe_dir"),
            Self::ExeDir { path: Some(path), .. } => write!(f, "exe_dir {}", path.display()),
            Self::ExeZip { .. } => f.write_str("exe_zip"),
            Self::ManifestDir { path: None, .. } => f.write_str("manifest_dir"),
            Self::ManifestDir {
                path: Some(path), ..
            } => write!(f, "manifest_dir {}", path.display()),
        }
    }
}

/// Ordered search path configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPathConfig {
    /// Entries in priority order
    #[serde(default)]
    pub search_path: Vec<SearchPathEntry>,

    /// Directory relative entry paths resolve against
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl Default for SearchPathConfig {
    /// Working directory, then the executable's directory, then an archive
    /// appended to the executable if there is one.
    fn default() -> Self {
        Self::from_entries(vec![
            SearchPathEntry::WorkingDir,
            SearchPathEntry::ExeDir {
                path: None,
                optional: false,
            },
            SearchPathEntry::ExeZip { optional: true },
        ])
    }
}

impl SearchPathConfig {
    /// Create a configuration from explicit entries
    pub fn from_entries(search_path: Vec<SearchPathEntry>) -> Self {
        Self {
            search_path,
            base_dir: None,
        }
    }

    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let shown = path.display().to_string();
        let yaml = fs::read_to_string(path).map_err(|e| read_failed(shown.as_str(), e.to_string()))?;

        let mut config = Self::parse(&yaml, &shown)?;
        config.base_dir = path
            .parent()
            .map(|dir| dunce::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf()));
        debug!(config = %shown, entries = config.search_path.len(), "loaded search path configuration");
        Ok(config)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Self::parse(yaml, "<string>")
    }

    fn parse(yaml: &str, origin: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| parse_failed(origin, e.to_string()))
    }

    /// Resolve relative entry paths against `dir`
    #[must_use]
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Directory relative entry paths resolve against, if set
    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    /// Serialize the configuration to YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| parse_failed("<config>", e.to_string()))
    }

    /// Open every entry and stack them into a sequence.
    ///
    /// Optional entries that can not be opened stay in the sequence as
    /// absent members. A required entry that can not be opened fails the
    /// whole build.
    pub fn build(&self) -> Result<BundleSequence> {
        let mut sequence = BundleSequence::new();
        for entry in &self.search_path {
            match self.open_entry(entry) {
                Ok(bundle) => {
                    debug!(entry = %entry, bundle = ?bundle, "added search path entry");
                    sequence.push(bundle);
                }
                Err(e) if entry.is_optional() => {
                    debug!(entry = %entry, error = %e, "skipping optional search path entry");
                    sequence.push_optional(None);
                }
                Err(e) => return Err(entry_failed(entry.to_string(), e)),
            }
        }
        Ok(sequence)
    }

    fn open_entry(&self, entry: &SearchPathEntry) -> Result<BundleRef> {
        match entry {
            SearchPathEntry::Fs { path, .. } => open_dir(self.resolve(path)?),
            SearchPathEntry::Zip { path, .. } => {
                Ok(ZipBundle::open(self.resolve(path)?)?.into_bundle())
            }
            SearchPathEntry::WorkingDir => open_dir(working_dir()?),
            SearchPathEntry::ExeDir { path, .. } => {
                let exe = executable_path()?;
                let dir = exe
                    .parent()
                    .ok_or_else(|| executable_not_found("executable has no parent directory"))?;
                open_dir(join_optional(dir, path.as_deref()))
            }
            SearchPathEntry::ExeZip { .. } => Ok(ZipBundle::open(executable_path()?)?.into_bundle()),
            SearchPathEntry::ManifestDir { path, .. } => {
                let dir = env::var_os(MANIFEST_DIR_VAR).ok_or_else(|| {
                    read_failed(MANIFEST_DIR_VAR, "environment variable is not set")
                })?;
                open_dir(join_optional(Path::new(&dir), path.as_deref()))
            }
        }
    }

    fn resolve(&self, path: &Path) -> Result<PathBuf> {
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        match &self.base_dir {
            Some(base) => Ok(base.join(path)),
            None => Ok(working_dir()?.join(path)),
        }
    }
}

/// Locate the running executable, with symlinks resolved.
pub fn executable_path() -> Result<PathBuf> {
    let exe = env::current_exe().map_err(|e| executable_not_found(e.to_string()))?;
    dunce::canonicalize(&exe).map_err(|e| executable_not_found(format!("{}: {e}", exe.display())))
}

fn working_dir() -> Result<PathBuf> {
    env::current_dir().map_err(|e| io_error(".", e))
}

fn join_optional(dir: &Path, path: Option<&Path>) -> PathBuf {
    match path {
        Some(path) => dir.join(path),
        None => dir.to_path_buf(),
    }
}

/// Open a directory bundle, requiring the directory to exist
fn open_dir(dir: PathBuf) -> Result<BundleRef> {
    let shown = dir.display().to_string();
    let metadata = fs::metadata(&dir).map_err(|e| io_error(shown.as_str(), e))?;
    if !metadata.is_dir() {
        return Err(io_error(
            shown,
            io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
        ));
    }
    Ok(FsBundle::new(dir).into_bundle())
}

impl From<Vec<SearchPathEntry>> for SearchPathConfig {
    fn from(entries: Vec<SearchPathEntry>) -> Self {
        Self::from_entries(entries)
    }
}
