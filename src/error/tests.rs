//! Error type tests
//!
//! Tests for `BundleError`, its diagnostics and the not-found predicate.

#![allow(clippy::expect_used)]

use crate::error::path::{escapes_root, malformed_pattern, not_relative};
use crate::error::{BundleError, Op, io_error, is_not_found, not_found};
use miette::Diagnostic;
use std::error::Error;
use std::io;

macro_rules! test_error_contains {
    ($test_name:ident, $err:expr, $($contains:expr),+ $(,)?) => {
        #[test]
        fn $test_name() {
            let err = $err;
            let error_string = err.to_string();
            $(
                assert!(error_string.contains($contains),
                    "Error message should contain '{}', got: {}",
                    $contains,
                    error_string
                );
            )+
        }
    };
}

test_error_contains!(test_not_found_message, not_found("a/b.txt"), "not found", "a/b.txt");
test_error_contains!(test_escapes_root_message, escapes_root("../x"), "escapes", "../x");
test_error_contains!(test_not_relative_message, not_relative("/etc"), "not relative", "/etc");
test_error_contains!(
    test_malformed_pattern_message,
    malformed_pattern("[a", "unclosed class"),
    "[a",
    "unclosed class"
);
test_error_contains!(
    test_annotated_message,
    not_found("x.png").annotate(Op::Get, "x.png"),
    "get x.png",
    "not found"
);

#[test]
fn test_error_code() {
    let err = escapes_root("../secret");
    assert_eq!(
        err.code()
            .map(|c: Box<dyn std::fmt::Display>| c.to_string()),
        Some("resbundle::path::escapes_root".to_string())
    );
}

#[test]
fn test_is_not_found_variants() {
    assert!(not_found("a").is_not_found());
    assert!(io_error("a", io::Error::from(io::ErrorKind::NotFound)).is_not_found());
    assert!(!io_error("a", io::Error::from(io::ErrorKind::PermissionDenied)).is_not_found());
    assert!(!escapes_root("../a").is_not_found());
    assert!(!not_relative("/a").is_not_found());
    assert!(!BundleError::Closed.is_not_found());
}

#[test]
fn test_is_not_found_through_annotations() {
    let err = not_found("a")
        .annotate(Op::Get, "a")
        .annotate(Op::Get, "a");
    assert!(err.is_not_found());
    assert!(is_not_found(&err));

    let err = escapes_root("../a").annotate(Op::Get, "../a");
    assert!(!is_not_found(&err));
}

#[test]
fn test_is_not_found_on_foreign_errors() {
    let io_err = io::Error::from(io::ErrorKind::NotFound);
    assert!(is_not_found(&io_err));

    let io_err: io::Error = not_found("a").into();
    assert_eq!(io_err.kind(), io::ErrorKind::NotFound);
    assert!(is_not_found(&io_err));

    let io_err: io::Error = BundleError::Closed.into();
    assert!(!is_not_found(&io_err));
}

#[test]
fn test_annotate_same_op_and_path_once() {
    let err = not_found("a").annotate(Op::Get, "a").annotate(Op::Get, "a");
    assert_eq!(err.to_string(), "get a: resource not found: a");

    let err = not_found("a").annotate(Op::Get, "a").annotate(Op::Glob, "*");
    assert_eq!(err.to_string(), "glob *: get a: resource not found: a");
}

#[test]
fn test_annotation_preserves_source() {
    let err = not_found("a.txt").annotate(Op::Glob, "*.txt");
    let source = err.source().expect("annotated error has a source");
    assert!(source.to_string().contains("a.txt"));
}

#[test]
fn test_op_display() {
    assert_eq!(Op::Get.to_string(), "get");
    assert_eq!(Op::Glob.to_string(), "glob");
    assert_eq!(Op::List.to_string(), "list");
}
