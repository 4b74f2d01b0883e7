//! Resbundle - path-addressed resource bundles
//!
//! Programs look up their data files (images, templates, configuration) by
//! portable, forward-slash paths such as `images/logo.png`. Where the bytes
//! actually live is decided by the bundle behind the lookup:
//!
//! - [`FsBundle`]: a directory in the native filesystem
//! - [`ZipBundle`]: a zip archive, including one appended to an executable
//! - [`open_list`] / [`open_lister`]: any enumerable collection of resources
//! - [`BundleSequence`]: an ordered search path over other bundles
//!
//! A search path is usually assembled from a [`SearchPathConfig`]:
//!
//! ```no_run
//! use resbundle::prelude::*;
//! use resbundle::SearchPathConfig;
//!
//! # fn main() -> resbundle::Result<()> {
//! let bundle = SearchPathConfig::default().build()?;
//! let logo = bundle.get("images/logo.png")?;
//! let bytes = resbundle::read_to_vec(logo.as_ref())?;
//! # let _ = bytes;
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod bundle;
pub mod error;
pub mod fs;
pub mod path;
pub mod resource;
pub mod search_path;

pub use archive::{ZipBundle, ZipResource};
pub use bundle::{
    Bundle, BundleCloser, BundleRef, BundleSequence, Lister, ListerBundle, open_list, open_lister,
};
pub use error::{BundleError, Result, is_not_found};
pub use fs::{FsBundle, FsResource};
pub use path::{GlobPattern, check_path, clean};
pub use resource::{MemoryResource, Resource, ResourceInfo, ResourceRef, read_to_vec};
pub use search_path::{SearchPathConfig, SearchPathEntry, executable_path};

/// Traits needed to call bundle and resource methods
pub mod prelude {
    pub use crate::bundle::{Bundle, BundleCloser, Lister};
    pub use crate::resource::Resource;
}
