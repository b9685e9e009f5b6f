//! `Path` — compiled dotted/bracket path.
//!
//! A path string like `dags.[*].tags.[0].name` compiles into a sequence of
//! [`Segment`]s. Parsing performs the full syntax validation up front, so a
//! constructed `Path` is always traversable.
//!
//! # Grammar
//!
//! ```text
//! path     := segment ("." segment)*
//! segment  := field | index | wildcard
//! field    := any non-empty string without "." "[" "]"
//! index    := "[" digits "]"
//! wildcard := "[*]"
//! ```
//!
//! Mixed syntax like `key[0]` is rejected: index access must be its own
//! segment (`key.[0]`).

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::{PathError, MAX_PATH_LENGTH, MAX_SEGMENTS};

/// Segment grammar for bracket tokens: `[*]` or `[<digits>]`.
fn bracket_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\[(\*|\d+)\]$").unwrap_or_else(|_| unreachable!()))
}

/// One step of a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Descend into the named entry of an object.
    Field(String),
    /// Descend into element `N` of an array.
    Index(usize),
    /// Fan out over every element of an array.
    Wildcard,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => write!(f, "{name}"),
            Self::Index(idx) => write!(f, "[{idx}]"),
            Self::Wildcard => write!(f, "[*]"),
        }
    }
}

/// A compiled dotted/bracket path.
///
/// Construct via [`Path::parse`] (or `str::parse`). Parsing validates the
/// whole path; resolution over a parsed path never fails.
///
/// # Example
///
/// ```
/// use dotcheck::{Path, Segment};
///
/// let path = Path::parse("dags.[*].dag_id")?;
/// assert!(path.has_wildcard());
/// assert_eq!(path.segments().len(), 3);
/// assert_eq!(path.segments()[1], Segment::Wildcard);
/// assert_eq!(path.to_string(), "dags.[*].dag_id");
/// # Ok::<(), dotcheck::PathError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    raw: String,
    segments: Vec<Segment>,
    has_wildcard: bool,
}

impl Path {
    /// Parse and validate a path string.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] if any segment violates the grammar: empty
    /// segments, malformed bracket tokens, brackets embedded in field
    /// names, or a path exceeding [`MAX_PATH_LENGTH`] / [`MAX_SEGMENTS`].
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        if raw.len() > MAX_PATH_LENGTH {
            return Err(PathError::PathTooLong {
                len: raw.len(),
                max: MAX_PATH_LENGTH,
            });
        }

        let parts: Vec<&str> = raw.split('.').collect();
        if parts.len() > MAX_SEGMENTS {
            return Err(PathError::TooManySegments {
                count: parts.len(),
                max: MAX_SEGMENTS,
            });
        }

        let mut segments = Vec::with_capacity(parts.len());
        let mut has_wildcard = false;

        for part in parts {
            if part.is_empty() {
                return Err(PathError::EmptySegment {
                    path: raw.to_string(),
                });
            }

            if part.starts_with('[') {
                if !bracket_pattern().is_match(part) {
                    return Err(PathError::BadIndexSegment {
                        path: raw.to_string(),
                        segment: part.to_string(),
                    });
                }
                if part == "[*]" {
                    has_wildcard = true;
                    segments.push(Segment::Wildcard);
                } else {
                    // The pattern guarantees pure digits between brackets.
                    let digits = &part[1..part.len() - 1];
                    let idx = digits.parse::<usize>().map_err(|_| {
                        PathError::BadIndexSegment {
                            path: raw.to_string(),
                            segment: part.to_string(),
                        }
                    })?;
                    segments.push(Segment::Index(idx));
                }
            } else {
                if part.contains('[') || part.contains(']') {
                    return Err(PathError::BracketInField {
                        path: raw.to_string(),
                        segment: part.to_string(),
                    });
                }
                segments.push(Segment::Field(part.to_string()));
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
            has_wildcard,
        })
    }

    /// The original path string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed segments, in order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether the path contains at least one `[*]` segment.
    ///
    /// Wildcard paths resolve to a list; wildcard-free paths resolve to at
    /// most one value.
    #[inline]
    #[must_use]
    pub fn has_wildcard(&self) -> bool {
        self.has_wildcard
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
