//! Layered search paths
//!
//! A [`BundleSequence`] probes its member bundles in order and behaves as a
//! single bundle. Priority is strictly positional: index 0 wins.
//!
//! - `get` returns the first member's hit. Not-found answers fall through
//!   to the next member; any other failure aborts the lookup.
//! - `glob` and `list` consult every member and union the results by path,
//!   keeping the first-seen resource when two members share a path.
//!
//! Absent members (`None`) are skipped silently.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, trace};

use super::{Bundle, BundleRef, Lister};
use crate::error::{Op, Result, not_found};
use crate::resource::ResourceRef;

/// An ordered list of bundles probed as a search path
#[derive(Debug, Clone, Default)]
pub struct BundleSequence {
    members: Vec<Option<BundleRef>>,
}

impl BundleSequence {
    /// Create an empty sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a member with the lowest priority so far
    pub fn push(&mut self, bundle: BundleRef) {
        self.members.push(Some(bundle));
    }

    /// Append a member that may be absent
    pub fn push_optional(&mut self, bundle: Option<BundleRef>) {
        self.members.push(bundle);
    }

    /// Builder-style [`push`](Self::push)
    #[must_use]
    pub fn with(mut self, bundle: BundleRef) -> Self {
        self.push(bundle);
        self
    }

    /// Number of members, including absent ones
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if the sequence has no members at all
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in priority order
    pub fn members(&self) -> &[Option<BundleRef>] {
        &self.members
    }

    fn present(&self) -> impl Iterator<Item = (usize, &BundleRef)> {
        self.members
            .iter()
            .enumerate()
            .filter_map(|(index, member)| member.as_ref().map(|bundle| (index, bundle)))
    }

    /// Append every resource not already seen, in order
    fn merge(
        merged: &mut Vec<ResourceRef>,
        seen: &mut HashSet<String>,
        found: Vec<ResourceRef>,
    ) {
        for resource in found {
            if seen.insert(resource.path().to_string()) {
                merged.push(resource);
            }
        }
    }
}

impl FromIterator<Option<BundleRef>> for BundleSequence {
    fn from_iter<I: IntoIterator<Item = Option<BundleRef>>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<BundleRef> for BundleSequence {
    fn from_iter<I: IntoIterator<Item = BundleRef>>(iter: I) -> Self {
        iter.into_iter().map(Some).collect()
    }
}

impl Lister for BundleSequence {
    fn list(&self) -> Result<Vec<ResourceRef>> {
        let mut merged = Vec::new();
        let mut seen = HashSet::new();

        for (index, bundle) in self.present() {
            let found = bundle.list().map_err(|e| e.annotate(Op::List, "."))?;
            trace!(member = index, count = found.len(), "listed sequence member");
            Self::merge(&mut merged, &mut seen, found);
        }

        Ok(merged)
    }

    fn into_bundle(self) -> BundleRef {
        Arc::new(self)
    }
}

impl Bundle for BundleSequence {
    fn get(&self, path: &str) -> Result<ResourceRef> {
        for (index, bundle) in self.present() {
            match bundle.get(path) {
                Ok(resource) => {
                    debug!(path, member = index, "resolved resource");
                    return Ok(resource);
                }
                Err(e) if e.is_not_found() => {
                    trace!(path, member = index, "not in sequence member");
                }
                Err(e) => return Err(e.annotate(Op::Get, path)),
            }
        }

        Err(not_found(path).annotate(Op::Get, path))
    }

    fn glob(&self, pattern: &str) -> Result<Vec<ResourceRef>> {
        let mut merged = Vec::new();
        let mut seen = HashSet::new();

        for (index, bundle) in self.present() {
            let found = bundle
                .glob(pattern)
                .map_err(|e| e.annotate(Op::Glob, pattern))?;
            trace!(pattern, member = index, count = found.len(), "globbed sequence member");
            Self::merge(&mut merged, &mut seen, found);
        }

        Ok(merged)
    }
}
