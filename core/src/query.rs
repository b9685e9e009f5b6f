//! Traversal and extraction: resolving a [`Path`] against a document.
//!
//! Resolution is a recursive descent over the parsed segments. It is
//! read-only, performs no I/O, and never fails: absence terminates the
//! affected branch instead of raising.
//!
//! # Null policy
//!
//! The engine distinguishes "branch is missing" from "leaf is present but
//! null":
//!
//! - A missing branch (absent key, short array, wrong container kind)
//!   contributes **nothing** to a wildcard match list.
//! - A present but null leaf contributes **`Value::Null`** to a wildcard
//!   match list, so callers can report exactly which element is null.
//! - Single-value extraction ([`MatchSet::as_single`]) maps both cases to
//!   `None`.
//! - Unique mode drops nulls from the deduplicated list.

use serde_json::Value;

use crate::path::Segment;
use crate::{Path, PathError};

/// The values a path resolved to within one document.
///
/// Wildcard-free paths always produce [`MatchSet::One`]; paths containing
/// `[*]` always produce [`MatchSet::Many`], preserving document order
/// (depth-first, element order at each fan-out).
///
/// # Example
///
/// ```
/// use dotcheck::prelude::*;
/// use serde_json::json;
///
/// let doc = json!({"a": [{"v": 1}, {"v": 2}, {"v": 3}]});
///
/// let many = get_value(&doc, "a.[*].v")?;
/// assert_eq!(many.to_vec(), vec![&json!(1), &json!(2), &json!(3)]);
///
/// let one = get_value(&doc, "a.[1].v")?;
/// assert_eq!(one.as_single(), Some(&json!(2)));
/// # Ok::<(), dotcheck::PathError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum MatchSet<'a> {
    /// Result of a wildcard-free path: at most one value.
    ///
    /// `None` means the path did not resolve, or resolved to an explicit
    /// JSON null.
    One(Option<&'a Value>),

    /// Result of a wildcard path: all matched values in document order.
    ///
    /// Explicit null leaves appear as `Value::Null`; missing branches are
    /// skipped.
    Many(Vec<&'a Value>),
}

impl<'a> MatchSet<'a> {
    /// The single resolved value of a wildcard-free path.
    ///
    /// Returns `None` for wildcard results (use [`to_vec`](Self::to_vec))
    /// and for unresolved or null single values.
    #[must_use]
    pub fn as_single(&self) -> Option<&'a Value> {
        match self {
            Self::One(v) => *v,
            Self::Many(_) => None,
        }
    }

    /// All matched values as a list.
    ///
    /// A resolved single value becomes a one-element list; an unresolved
    /// single value becomes an empty list.
    #[must_use]
    pub fn to_vec(&self) -> Vec<&'a Value> {
        match self {
            Self::One(Some(v)) => vec![*v],
            Self::One(None) => Vec::new(),
            Self::Many(values) => values.clone(),
        }
    }

    /// Number of matched values.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::One(Some(_)) => 1,
            Self::One(None) => 0,
            Self::Many(values) => values.len(),
        }
    }

    /// Whether no value matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this is a wildcard ([`Many`](Self::Many)) result.
    #[inline]
    #[must_use]
    pub fn is_many(&self) -> bool {
        matches!(self, Self::Many(_))
    }

    /// Collapse a wildcard result to first-occurrence-order unique values.
    ///
    /// Nulls are excluded from the unique list even when a type rule would
    /// otherwise permit them. Single results are returned unchanged.
    #[must_use]
    pub fn unique(self) -> Self {
        match self {
            one @ Self::One(_) => one,
            Self::Many(values) => {
                let mut seen: Vec<&Value> = Vec::with_capacity(values.len());
                for value in values {
                    if value.is_null() {
                        continue;
                    }
                    // Value is not Hash; linear scan keeps first-occurrence order.
                    if !seen.contains(&value) {
                        seen.push(value);
                    }
                }
                Self::Many(seen)
            }
        }
    }
}

impl Path {
    /// Resolve this path against a document.
    ///
    /// Never fails: absence along the way yields an empty result, not an
    /// error. See the [module docs](self) for the null policy.
    #[must_use]
    pub fn resolve<'a>(&self, doc: &'a Value) -> MatchSet<'a> {
        let mut results = Vec::new();
        traverse(doc, self.segments(), &mut results);

        if self.has_wildcard() {
            MatchSet::Many(results)
        } else {
            // At most one result without wildcards; a null leaf counts as
            // unresolved for single-value extraction.
            let single = results
                .into_iter()
                .next()
                .filter(|value| !value.is_null());
            MatchSet::One(single)
        }
    }

    /// Resolve with wildcard results deduplicated (nulls excluded).
    ///
    /// Equivalent to `self.resolve(doc).unique()`.
    #[must_use]
    pub fn resolve_unique<'a>(&self, doc: &'a Value) -> MatchSet<'a> {
        self.resolve(doc).unique()
    }
}

/// Recursive descent over path segments.
///
/// Appends every leaf the remaining segments reach from `current` onto
/// `out`, in document order.
fn traverse<'a>(current: &'a Value, segments: &[Segment], out: &mut Vec<&'a Value>) {
    let Some((segment, remaining)) = segments.split_first() else {
        out.push(current);
        return;
    };

    match segment {
        Segment::Field(name) => {
            if let Value::Object(map) = current {
                if let Some(child) = map.get(name) {
                    traverse(child, remaining, out);
                }
            }
            // Non-objects and absent keys terminate the branch silently.
        }
        Segment::Index(idx) => {
            if let Value::Array(items) = current {
                if let Some(child) = items.get(*idx) {
                    traverse(child, remaining, out);
                }
            }
        }
        Segment::Wildcard => {
            if let Value::Array(items) = current {
                for item in items {
                    traverse(item, remaining, out);
                }
            }
        }
    }
}

/// Parse `path` and resolve it against `doc` in one call.
///
/// # Errors
///
/// Returns [`PathError`] if the path string violates the segment grammar.
/// Traversal itself cannot fail.
///
/// # Example
///
/// ```
/// use dotcheck::get_value;
/// use serde_json::json;
///
/// let doc = json!({"total_entries": 1});
/// let result = get_value(&doc, "total_entries")?;
/// assert_eq!(result.as_single(), Some(&json!(1)));
/// # Ok::<(), dotcheck::PathError>(())
/// ```
pub fn get_value<'a>(doc: &'a Value, path: &str) -> Result<MatchSet<'a>, PathError> {
    Ok(Path::parse(path)?.resolve(doc))
}

/// Like [`get_value`], with wildcard results deduplicated (nulls excluded).
///
/// Uniqueness is a no-op for wildcard-free paths.
///
/// # Errors
///
/// Returns [`PathError`] if the path string violates the segment grammar.
pub fn get_value_unique<'a>(doc: &'a Value, path: &str) -> Result<MatchSet<'a>, PathError> {
    Ok(Path::parse(path)?.resolve_unique(doc))
}
