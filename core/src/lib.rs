//! dotcheck - dotted-path query engine over JSON documents
//!
//! A small path-query language for asserting on JSON structures in API
//! tests: dotted field access, explicit list indices, and wildcard fan-out.
//!
//! # Architecture
//!
//! The engine splits config time from run time:
//!
//! - [`Path`] — Compiled path: parsed and syntax-checked segments
//! - [`Segment`] — One step of a path (field, index, or wildcard)
//! - [`MatchSet`] — Result of resolving a path against a document
//! - [`JsonKind`] / [`TypeSpec`] — Runtime type classification and the set
//!   of kinds a path is allowed to resolve to
//!
//! # Key Design Insights
//!
//! 1. **Fail fast on syntax**: a path is fully validated by [`Path::parse`]
//!    before any traversal happens. Traversal itself never errors.
//!
//! 2. **Absence is tolerated, null is visible**: a missing branch under a
//!    wildcard contributes nothing to the match list, while a present but
//!    null leaf contributes `Value::Null`. Single-value extraction maps
//!    both to `None`. See [`MatchSet`] for the full policy.
//!
//! 3. **Non-wildcard determinism**: a path without `[*]` resolves to at
//!    most one value, never a list.
//!
//! # Example
//!
//! ```
//! use dotcheck::prelude::*;
//! use serde_json::json;
//!
//! let doc = json!({"dags": [{"dag_id": "d1"}, {"dag_id": "d2"}]});
//!
//! let path = Path::parse("dags.[*].dag_id")?;
//! let matches = path.resolve(&doc);
//! assert_eq!(matches.to_vec(), vec![&json!("d1"), &json!("d2")]);
//!
//! // Wildcard-free paths resolve to a single value.
//! let first = Path::parse("dags.[0].dag_id")?.resolve(&doc);
//! assert_eq!(first.as_single(), Some(&json!("d1")));
//! # Ok::<(), dotcheck::PathError>(())
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod kind;
mod path;
mod query;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

pub use kind::{JsonKind, TypeSpec, TypeSpecParseError};
pub use path::{Path, Segment};
pub use query::{get_value, get_value_unique, MatchSet};

// Document type: any JSON value.
pub use serde_json::Value;

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use dotcheck::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        get_value, get_value_unique, JsonKind, MatchSet, Path, PathError, Segment, TypeSpec, Value,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════════

/// Maximum allowed length (in bytes) of a path string.
///
/// Paths come from test code and config files; anything longer than this is
/// a mistake, not a query. Enforced by [`Path::parse`].
pub const MAX_PATH_LENGTH: usize = 1024;

/// Maximum number of segments in a single path.
///
/// Bounds traversal recursion on the path side. Document nesting depth is
/// bounded by the JSON decoder, so segment count is the only limit the
/// engine itself must enforce.
pub const MAX_SEGMENTS: usize = 64;

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors from path parsing and syntax validation.
///
/// These are caught before any traversal begins. Fix the path string and
/// re-parse; traversal over a parsed [`Path`] never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A segment is the empty string (e.g. `"a..b"` or a trailing dot).
    EmptySegment {
        /// The full offending path.
        path: String,
    },
    /// A bracket segment is neither `[*]` nor `[<digits>]`.
    BadIndexSegment {
        /// The full offending path.
        path: String,
        /// The segment that failed the index grammar.
        segment: String,
    },
    /// A field segment contains a literal `[` or `]`.
    ///
    /// Index access must be its own segment: `key.[0]`, never `key[0]`.
    BracketInField {
        /// The full offending path.
        path: String,
        /// The segment with the embedded bracket.
        segment: String,
    },
    /// Path string exceeds [`MAX_PATH_LENGTH`].
    PathTooLong {
        /// Actual length of the path string in bytes.
        len: usize,
        /// Maximum allowed length.
        max: usize,
    },
    /// Path has more than [`MAX_SEGMENTS`] segments.
    TooManySegments {
        /// Actual number of segments.
        count: usize,
        /// Maximum allowed.
        max: usize,
    },
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySegment { path } => {
                write!(f, "path \"{path}\" contains an empty segment")
            }
            Self::BadIndexSegment { path, segment } => {
                write!(
                    f,
                    "invalid index segment \"{segment}\" in path \"{path}\": \
                     use `[*]` for all elements or `[<number>]` for one"
                )
            }
            Self::BracketInField { path, segment } => {
                write!(
                    f,
                    "field segment \"{segment}\" in path \"{path}\" contains a bracket: \
                     index access must be its own segment, e.g. `key.[0]`"
                )
            }
            Self::PathTooLong { len, max } => {
                write!(f, "path length is {len} bytes, but maximum allowed is {max}")
            }
            Self::TooManySegments { count, max } => {
                write!(f, "path has {count} segments, but maximum allowed is {max}")
            }
        }
    }
}

impl std::error::Error for PathError {}
