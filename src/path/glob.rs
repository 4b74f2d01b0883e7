//! Glob patterns over portable paths
//!
//! Wildcards follow shell rules within a single segment: `*` never crosses
//! a `/`, `?` matches one character and `[...]` matches a character class
//! (`[!...]` or `[^...]` negates it). A backslash makes the next character
//! literal. Every other character, braces and parentheses included, matches
//! itself.
//!
//! Patterns are rewritten into wax syntax before compiling, escaping the
//! characters wax would read as its own operators. A `**` segment is passed
//! through as wax's recursive wildcard.

use std::fmt;

use wax::{CandidatePath, Glob, Pattern};

use crate::error::Result;
use crate::error::path::malformed_pattern;

/// A compiled glob pattern
pub struct GlobPattern {
    source: String,
    glob: Glob<'static>,
    depth: Option<usize>,
}

impl GlobPattern {
    /// Compile a glob pattern, failing with `MalformedPattern` on bad syntax
    pub fn new(pattern: &str) -> Result<Self> {
        let translated = to_wax(pattern).map_err(|reason| malformed_pattern(pattern, reason))?;
        let glob = Glob::new(&translated)
            .map_err(|e| malformed_pattern(pattern, e))?
            .into_owned();

        Ok(Self {
            source: pattern.to_string(),
            glob,
            depth: segment_depth(pattern),
        })
    }

    /// Returns true if the portable path matches this pattern
    pub fn matches(&self, path: &str) -> bool {
        let candidate = CandidatePath::from(path);
        self.glob.matched(&candidate).is_some()
    }

    /// Number of path segments a match must have.
    ///
    /// `None` when the pattern uses `**` and can match paths of varying depth.
    pub fn depth(&self) -> Option<usize> {
        self.depth
    }

    /// The pattern text this glob was compiled from
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Debug for GlobPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobPattern")
            .field("pattern", &self.source)
            .field("depth", &self.depth)
            .finish()
    }
}

/// Characters wax treats as operators outside a class
const WAX_META: &str = "\\?*$:<>()[]{},";

/// Rewrite a shell glob into wax syntax
fn to_wax(pattern: &str) -> std::result::Result<String, &'static str> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '\\' => {
                let escaped = *chars.get(i + 1).ok_or("trailing backslash")?;
                push_literal(&mut out, escaped);
                i += 2;
            }
            '[' => i = push_class(&chars, i + 1, &mut out)?,
            c @ ('*' | '?' | '/') => {
                out.push(c);
                i += 1;
            }
            c => {
                push_literal(&mut out, c);
                i += 1;
            }
        }
    }
    Ok(out)
}

fn push_literal(out: &mut String, c: char) {
    if WAX_META.contains(c) {
        out.push('\\');
    }
    out.push(c);
}

/// Copy a class whose `[` ends just before `i`, returning the index past its `]`.
///
/// A `]` right after the opening bracket (or its negation) is a member.
fn push_class(
    chars: &[char],
    mut i: usize,
    out: &mut String,
) -> std::result::Result<usize, &'static str> {
    out.push('[');
    if matches!(chars.get(i), Some('!' | '^')) {
        out.push('!');
        i += 1;
    }
    let first = i;
    loop {
        match chars.get(i) {
            None => return Err("unclosed character class"),
            Some(']') if i > first => {
                out.push(']');
                return Ok(i + 1);
            }
            Some('\\') => {
                let escaped = *chars.get(i + 1).ok_or("trailing backslash")?;
                if escaped == '-' {
                    out.push('\\');
                }
                push_class_member(out, escaped);
                i += 2;
            }
            Some(&c) => {
                push_class_member(out, c);
                i += 1;
            }
        }
    }
}

fn push_class_member(out: &mut String, c: char) {
    if matches!(c, '[' | ']' | '\\') {
        out.push('\\');
    }
    out.push(c);
}

fn segment_depth(pattern: &str) -> Option<usize> {
    if pattern.contains("**") {
        return None;
    }
    Some(
        pattern
            .split('/')
            .filter(|segment| !segment.is_empty())
            .count(),
    )
}
