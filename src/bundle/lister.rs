//! Bundles derived from enumeration
//!
//! Many sources can only enumerate their content (static lists, archives).
//! [`ListerBundle`] turns any such [`Lister`] into a full [`Bundle`] by
//! deriving `get` and `glob` from `list`.

use std::fmt;
use std::sync::Arc;

use super::{Bundle, BundleRef};
use crate::error::{Op, Result, not_found};
use crate::path::{GlobPattern, check_path};
use crate::resource::ResourceRef;

/// Anything that can enumerate its resources on demand
pub trait Lister {
    /// Return every known resource
    fn list(&self) -> Result<Vec<ResourceRef>>;

    /// Convert into a full bundle.
    ///
    /// The default wraps `self` in a [`ListerBundle`]. Types that already
    /// implement [`Bundle`] natively override this to return themselves.
    fn into_bundle(self) -> BundleRef
    where
        Self: Sized + fmt::Debug + Send + Sync + 'static,
    {
        Arc::new(ListerBundle::new(self))
    }
}

/// Convert a lister into a bundle, passing native bundles through unchanged
pub fn open_lister<L>(lister: L) -> BundleRef
where
    L: Lister + fmt::Debug + Send + Sync + 'static,
{
    lister.into_bundle()
}

/// Build a bundle over an already materialized list of resources
pub fn open_list(resources: Vec<ResourceRef>) -> BundleRef {
    open_lister(SliceLister(resources))
}

/// Look up a normalized path in a listing
pub fn find_in(resources: Vec<ResourceRef>, path: &str) -> Result<ResourceRef> {
    resources
        .into_iter()
        .find(|resource| resource.path() == path)
        .ok_or_else(|| not_found(path))
}

/// Keep the resources of a listing that match a compiled pattern
pub fn glob_in(resources: Vec<ResourceRef>, pattern: &GlobPattern) -> Vec<ResourceRef> {
    resources
        .into_iter()
        .filter(|resource| pattern.matches(resource.path()))
        .collect()
}

/// Compile a glob pattern, annotating failures with the operation
pub(crate) fn compile_pattern(pattern: &str) -> Result<GlobPattern> {
    GlobPattern::new(pattern).map_err(|e| e.annotate(Op::Glob, pattern))
}

/// A [`Bundle`] deriving lookup and search from a [`Lister`]
#[derive(Debug)]
pub struct ListerBundle<L> {
    lister: L,
}

impl<L: Lister> ListerBundle<L> {
    /// Wrap a lister
    pub fn new(lister: L) -> Self {
        Self { lister }
    }

    /// Access the wrapped lister
    pub fn inner(&self) -> &L {
        &self.lister
    }
}

impl<L> Lister for ListerBundle<L>
where
    L: Lister + fmt::Debug + Send + Sync + 'static,
{
    fn list(&self) -> Result<Vec<ResourceRef>> {
        self.lister.list()
    }

    fn into_bundle(self) -> BundleRef
    where
        Self: Sized + fmt::Debug + Send + Sync + 'static,
    {
        Arc::new(self)
    }
}

impl<L> Bundle for ListerBundle<L>
where
    L: Lister + fmt::Debug + Send + Sync + 'static,
{
    fn get(&self, path: &str) -> Result<ResourceRef> {
        let path = check_path(path)?;
        find_in(self.lister.list()?, &path)
    }

    fn glob(&self, pattern: &str) -> Result<Vec<ResourceRef>> {
        let compiled = compile_pattern(pattern)?;
        Ok(glob_in(self.lister.list()?, &compiled))
    }
}

/// A fixed list of resources
#[derive(Debug, Clone)]
pub struct SliceLister(pub Vec<ResourceRef>);

impl Lister for SliceLister {
    fn list(&self) -> Result<Vec<ResourceRef>> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BundleError;
    use crate::resource::MemoryResource;
    use crate::fs::FsBundle;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sample() -> Vec<ResourceRef> {
        vec![
            MemoryResource::shared("foo.txt", "foo is foo"),
            MemoryResource::shared("subfolder/bar.txt", "bar is not foo"),
            MemoryResource::shared("logo.ico", [0u8, 0, 1, 0]),
        ]
    }

    #[test]
    fn test_get_exact_and_normalized() {
        let bundle = open_list(sample());
        assert_eq!(bundle.get("foo.txt").unwrap().path(), "foo.txt");
        assert_eq!(
            bundle.get("./subfolder/../subfolder//bar.txt").unwrap().path(),
            "subfolder/bar.txt"
        );
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let bundle = open_list(sample());
        let err = bundle.get("missing.txt").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_get_escaping_path() {
        let bundle = open_list(sample());
        assert!(matches!(
            bundle.get("../foo.txt"),
            Err(BundleError::EscapesRoot { .. })
        ));
    }

    #[test]
    fn test_glob_root_level_only() {
        let bundle = open_list(sample());
        let paths: Vec<String> = bundle
            .glob("*")
            .unwrap()
            .iter()
            .map(|r| r.path().to_string())
            .collect();
        assert_eq!(paths, vec!["foo.txt", "logo.ico"]);
    }

    #[test]
    fn test_glob_no_match_is_empty() {
        let bundle = open_list(sample());
        assert!(bundle.glob("*.png").unwrap().is_empty());
    }

    #[test]
    fn test_glob_malformed_pattern_names_operation() {
        let bundle = open_list(sample());
        let err = bundle.glob("[oops").unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("glob [oops"), "got: {message}");
        assert!(matches!(
            err,
            BundleError::Op { ref source, .. } if matches!(**source, BundleError::MalformedPattern { .. })
        ));
    }

    #[derive(Debug, Default)]
    struct CountingLister {
        calls: Arc<AtomicUsize>,
    }

    impl Lister for CountingLister {
        fn list(&self) -> Result<Vec<ResourceRef>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(sample())
        }
    }

    #[test]
    fn test_custom_lister_is_wrapped() {
        let lister = CountingLister::default();
        let calls = Arc::clone(&lister.calls);
        let bundle = open_lister(lister);
        assert!(format!("{bundle:?}").starts_with("ListerBundle"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert!(bundle.get("logo.ico").is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(bundle.get("missing.txt").unwrap_err().is_not_found());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(bundle.glob("*/*").unwrap().len(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(bundle.list().unwrap().len(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_native_bundle_passes_through() {
        let temp = tempfile::TempDir::new().unwrap();
        let bundle = open_lister(FsBundle::new(temp.path()));
        let shown = format!("{bundle:?}");
        assert!(shown.starts_with("FsBundle"), "got: {shown}");
        assert!(!shown.contains("ListerBundle"));
    }

    #[test]
    fn test_lister_bundle_is_not_wrapped_twice() {
        let wrapped = ListerBundle::new(CountingLister::default());
        let bundle = open_lister(wrapped);
        assert!(format!("{bundle:?}").starts_with("ListerBundle"));
        assert!(!format!("{bundle:?}").contains("ListerBundle { lister: ListerBundle"));
    }

    #[test]
    fn test_list_is_stable() {
        let bundle = open_list(sample());
        let first: Vec<String> = bundle.list().unwrap().iter().map(|r| r.path().to_string()).collect();
        let second: Vec<String> = bundle.list().unwrap().iter().map(|r| r.path().to_string()).collect();
        assert_eq!(first, second);
    }
}
