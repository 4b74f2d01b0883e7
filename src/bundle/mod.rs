//! Bundle contracts
//!
//! A **Bundle** is a read-only collection of [`Resource`](crate::resource::Resource)s
//! supporting point lookup, pattern search and enumeration.
//!
//! - `get` takes a portable path and returns the matching resource, or an
//!   error for which [`BundleError::is_not_found`](crate::error::BundleError::is_not_found)
//!   holds when nothing is there.
//! - `glob` takes a portable glob pattern and returns every matching
//!   resource. No match is an empty result, not an error.
//! - `list` returns every *known* resource. Bundles are allowed to hold
//!   more than they list: files added after the call, hidden entries,
//!   alternate spellings of the same path, or sources that can not be
//!   enumerated at all. Each container documents its own policy.
//!
//! Directories are not resources and never appear in results.

pub mod lister;
pub mod sequence;

pub use lister::{Lister, ListerBundle, open_list, open_lister};
pub use sequence::BundleSequence;

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::resource::ResourceRef;

/// A read-only collection of resources.
///
/// Enumeration comes from the [`Lister`] supertrait.
///
/// Every implementation must override [`Lister::into_bundle`] with
/// `Arc::new(self)`. A bundle that keeps the default is wrapped in a
/// [`ListerBundle`] by [`open_lister`], and its own `get` and `glob` are then
/// never called: lookups go through `list` instead.
pub trait Bundle: Lister + fmt::Debug + Send + Sync {
    /// Look up a single resource by portable path
    fn get(&self, path: &str) -> Result<ResourceRef>;

    /// Find every resource whose portable path matches a glob pattern
    fn glob(&self, pattern: &str) -> Result<Vec<ResourceRef>>;
}

/// A bundle holding a releasable source
pub trait BundleCloser: Bundle {
    /// Release the underlying source, if this bundle owns it
    fn close(&self) -> Result<()>;
}

/// Shared handle to a bundle. Bundles may be members of several sequences.
pub type BundleRef = Arc<dyn Bundle>;
