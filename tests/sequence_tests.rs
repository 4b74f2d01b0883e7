//! Search path tests over real directories and archives

mod common;

use std::sync::Arc;

use common::{SAMPLE, TestWorkspace, sorted_paths};
use resbundle::prelude::*;
use resbundle::{
    BundleError, BundleSequence, FsBundle, MemoryResource, ZipBundle, open_list, read_to_vec,
};

fn read(bundle: &dyn Bundle, path: &str) -> Vec<u8> {
    let resource = bundle.get(path).unwrap();
    read_to_vec(resource.as_ref()).unwrap()
}

#[test]
fn test_directory_overrides_archive() {
    let workspace = TestWorkspace::new();
    let archive = workspace.write_zip("base.zip", SAMPLE);
    workspace.write_file("overrides/foo.txt", "patched foo");

    let sequence = BundleSequence::new()
        .with(FsBundle::new(workspace.path.join("overrides")).into_bundle())
        .with(ZipBundle::open(archive).unwrap().into_bundle());

    assert_eq!(read(&sequence, "foo.txt"), b"patched foo");
    assert_eq!(read(&sequence, "subfolder/bar.txt"), b"bar is not foo");
    assert!(sequence.get("missing.txt").unwrap_err().is_not_found());
}

#[test]
fn test_glob_and_list_deduplicate_by_path() {
    let workspace = TestWorkspace::new();
    let archive = workspace.write_zip("base.zip", SAMPLE);
    workspace.write_file("overrides/foo.txt", "patched foo");
    workspace.write_file("overrides/extra.txt", "extra");

    let sequence = BundleSequence::new()
        .with(FsBundle::new(workspace.path.join("overrides")).into_bundle())
        .with(ZipBundle::open(archive).unwrap().into_bundle());

    let top = sequence.glob("*.txt").unwrap();
    assert_eq!(sorted_paths(&top), vec!["extra.txt", "foo.txt"]);
    let foo = top.iter().find(|r| r.path() == "foo.txt").unwrap();
    assert_eq!(read_to_vec(foo.as_ref()).unwrap(), b"patched foo");

    assert_eq!(
        sorted_paths(&sequence.list().unwrap()),
        vec!["extra.txt", "foo.txt", "logo.ico", "subfolder/bar.txt"]
    );
}

#[test]
fn test_missing_directory_member_is_harmless() {
    let workspace = TestWorkspace::new();
    workspace.write_tree("present", SAMPLE);

    let sequence = BundleSequence::new()
        .with(FsBundle::new(workspace.path.join("absent")).into_bundle())
        .with(FsBundle::new(workspace.path.join("present")).into_bundle());

    assert_eq!(read(&sequence, "foo.txt"), b"foo is foo");
    assert_eq!(sequence.list().unwrap().len(), SAMPLE.len());
}

#[test]
fn test_absent_members_are_skipped() {
    let sequence: BundleSequence = vec![
        None,
        Some(open_list(vec![MemoryResource::shared("a.txt", "a")])),
        None,
    ]
    .into_iter()
    .collect();

    assert_eq!(sequence.len(), 3);
    assert_eq!(read(&sequence, "a.txt"), b"a");
    assert_eq!(sorted_paths(&sequence.glob("*").unwrap()), vec!["a.txt"]);
}

#[test]
fn test_bundle_shared_between_sequences() {
    let workspace = TestWorkspace::new();
    let shared = FsBundle::new(workspace.write_tree("shared", SAMPLE)).into_bundle();
    let first_only = open_list(vec![MemoryResource::shared("foo.txt", "first")]);

    let first = BundleSequence::new()
        .with(first_only)
        .with(Arc::clone(&shared));
    let second = BundleSequence::new().with(shared);

    assert_eq!(read(&first, "foo.txt"), b"first");
    assert_eq!(read(&second, "foo.txt"), b"foo is foo");
}

#[test]
fn test_nested_sequence() {
    let inner = BundleSequence::new()
        .with(open_list(vec![MemoryResource::shared("a.txt", "inner a")]))
        .with(open_list(vec![MemoryResource::shared("b.txt", "inner b")]));
    let outer = BundleSequence::new()
        .with(open_list(vec![MemoryResource::shared("b.txt", "outer b")]))
        .with(inner.into_bundle());

    assert_eq!(read(&outer, "a.txt"), b"inner a");
    assert_eq!(read(&outer, "b.txt"), b"outer b");
    assert_eq!(sorted_paths(&outer.list().unwrap()), vec!["a.txt", "b.txt"]);
}

#[test]
fn test_file_in_place_of_directory_falls_through() {
    let workspace = TestWorkspace::new();
    workspace.write_file("top/a.txt", "a file, not a directory");

    let sequence = BundleSequence::new()
        .with(FsBundle::new(workspace.path.join("top")).into_bundle())
        .with(open_list(vec![MemoryResource::shared("a.txt/inner.txt", "inner")]));

    assert_eq!(read(&sequence, "a.txt/inner.txt"), b"inner");
    assert_eq!(read(&sequence, "a.txt"), b"a file, not a directory");
}

#[test]
fn test_invalid_path_is_not_a_miss() {
    let sequence = BundleSequence::new().with(open_list(vec![MemoryResource::shared("a.txt", "a")]));

    let err = sequence.get("../a.txt").unwrap_err();
    assert!(!err.is_not_found());
    assert!(matches!(err, BundleError::Op { .. } | BundleError::EscapesRoot { .. }));
}

#[test]
fn test_malformed_pattern_reports_pattern() {
    let sequence = BundleSequence::new().with(open_list(vec![MemoryResource::shared("a.txt", "a")]));
    let err = sequence.glob("[abc").unwrap_err();
    assert!(err.to_string().contains("[abc"));
}
