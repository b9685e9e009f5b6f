//! dotcheck-http: response-level validation for HTTP API tests
//!
//! This crate composes the dotted-path engine from `dotcheck` into the
//! checks a test actually wants to write against an HTTP response:
//!
//! 1. **User API**: [`ResponseCheck`] builder / [`validate_response_json`]
//! 2. **Response surface**: the [`HttpResponse`] trait (status, URL, raw
//!    text, decoded JSON) — implement it for whatever client you use, or
//!    use the bundled [`RawResponse`]
//!
//! # Architecture
//!
//! ```text
//! ResponseCheck (what must hold)
//!         ↓ validate()
//! status → JSON decode → non-empty → required paths → path types
//!         ↓
//! parsed body (serde_json::Value) for further assertions
//! ```
//!
//! Checks short-circuit at the first failure; every failure carries the
//! path, the offending 1-based element index where applicable, and a
//! truncated snapshot of the response for diagnosis without re-running
//! the test.
//!
//! # Example
//!
//! ```
//! use dotcheck_http::prelude::*;
//! use serde_json::json;
//!
//! let resp = RawResponse::ok(
//!     json!({"dags": [{"dag_id": "d1", "is_paused": false}], "total_entries": 1}).to_string(),
//! );
//!
//! let body = ResponseCheck::new()
//!     .require("dags.[*].dag_id")
//!     .require("total_entries")
//!     .key_type("dags.[*].is_paused", TypeSpec::of(JsonKind::Bool))
//!     .key_type("total_entries", TypeSpec::of(JsonKind::Int))
//!     .validate(&resp)?;
//!
//! assert_eq!(body["total_entries"], json!(1));
//! # Ok::<(), dotcheck_http::CheckError>(())
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod checker;
mod response;

#[cfg(feature = "config")]
mod config;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

pub use checker::{
    assert_json_value, assert_json_values, truncate, validate_response_json, ResponseCheck,
    MAX_PREVIEW_LEN,
};
pub use response::{HttpResponse, RawResponse, RawResponseBuilder};

#[cfg(feature = "config")]
pub use config::CheckConfig;

// Re-export the engine types callers need alongside the checks.
pub use dotcheck::{JsonKind, MatchSet, Path, PathError, TypeSpec, Value};

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        assert_json_value, assert_json_values, validate_response_json, CheckError, HttpResponse,
        RawResponse, ResponseCheck,
    };
    #[cfg(feature = "config")]
    pub use super::CheckConfig;
    pub use dotcheck::prelude::*;
}

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// A failed response check.
///
/// Data-driven failures (the system under test returned something wrong)
/// and caller misuse (bad path syntax, wildcard where forbidden,
/// mismatched arities) share this enum; [`is_usage`](Self::is_usage)
/// distinguishes them.
///
/// `body` fields hold a preview of the response truncated to
/// [`MAX_PREVIEW_LEN`] characters.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckError {
    /// Response status code differs from the expected one.
    Status {
        /// The status code the check expected.
        expected: u16,
        /// The status code the response carried.
        actual: u16,
        /// Request URL, for diagnosis.
        url: String,
        /// Truncated raw response text.
        body: String,
    },
    /// Response body is not valid JSON.
    InvalidJson {
        /// The decoder's error message.
        source: String,
        /// Truncated raw response text.
        body: String,
    },
    /// Body decoded to an empty object/array (or a scalar) while
    /// `non_empty` was requested.
    EmptyBody {
        /// Truncated decoded body.
        body: String,
    },
    /// A required path resolved to no value, or to null.
    MissingValue {
        /// The required path.
        path: String,
        /// For wildcard paths: 1-based index of the null element.
        /// `None` when the path resolved to nothing at all.
        index: Option<usize>,
        /// Truncated decoded body.
        body: String,
    },
    /// A resolved value's runtime kind is not in the allowed set.
    TypeMismatch {
        /// The checked path.
        path: String,
        /// For wildcard paths: 1-based index of the mismatching element.
        index: Option<usize>,
        /// The kinds the check allowed.
        expected: TypeSpec,
        /// The kind actually found.
        actual: JsonKind,
        /// Truncated preview of the offending value.
        value: String,
        /// Truncated decoded body.
        body: String,
    },
    /// A value compared by [`assert_json_value`] differs from the expected one.
    ValueMismatch {
        /// The compared path.
        path: String,
        /// The expected value.
        expected: Value,
        /// The resolved value (`None` when the path did not resolve).
        actual: Option<Value>,
        /// Truncated decoded body.
        body: String,
    },
    /// A `[*]` segment was supplied to an exact-position entry point.
    WildcardForbidden {
        /// The offending path.
        path: String,
    },
    /// Parallel path/value slices have different lengths.
    ArityMismatch {
        /// Number of paths supplied.
        paths: usize,
        /// Number of expected values supplied.
        values: usize,
    },
    /// A path string violates the segment grammar.
    Path(PathError),
    /// A type-spec string did not parse.
    BadTypeSpec {
        /// The path the spec was attached to.
        path: String,
        /// The parse failure.
        source: String,
    },
}

impl CheckError {
    /// Whether this failure is caller misuse (precondition violation)
    /// rather than a data-driven failure of the system under test.
    #[must_use]
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Self::WildcardForbidden { .. }
                | Self::ArityMismatch { .. }
                | Self::Path(_)
                | Self::BadTypeSpec { .. }
        )
    }
}

impl std::fmt::Display for CheckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Status {
                expected,
                actual,
                url,
                body,
            } => {
                write!(
                    f,
                    "expected HTTP {expected}, got {actual} | URL: {url}\nResponse: {body}"
                )
            }
            Self::InvalidJson { source, body } => {
                write!(f, "invalid JSON: {source}\nResponse: {body}")
            }
            Self::EmptyBody { body } => {
                write!(f, "JSON body is empty\nResponse: {body}")
            }
            Self::MissingValue { path, index, body } => match index {
                Some(idx) => write!(
                    f,
                    "element #{idx} at path \"{path}\" is null or missing\nResponse: {body}"
                ),
                None => write!(f, "path \"{path}\" not found\nResponse: {body}"),
            },
            Self::TypeMismatch {
                path,
                index,
                expected,
                actual,
                value,
                body,
            } => {
                match index {
                    Some(idx) => write!(f, "type mismatch at element #{idx} | path: {path}")?,
                    None => write!(f, "type mismatch | path: {path}")?,
                }
                write!(
                    f,
                    " | expected: {expected} | actual: {actual} | value: {value}\nResponse: {body}"
                )
            }
            Self::ValueMismatch {
                path,
                expected,
                actual,
                body,
            } => {
                write!(f, "value mismatch at path \"{path}\" | expected: {expected} | actual: ")?;
                match actual {
                    Some(v) => write!(f, "{v}")?,
                    None => f.write_str("(not found)")?,
                }
                write!(f, "\nResponse: {body}")
            }
            Self::WildcardForbidden { path } => {
                write!(
                    f,
                    "wildcard [*] is forbidden in \"{path}\": use a concrete index such as [0]"
                )
            }
            Self::ArityMismatch { paths, values } => {
                write!(
                    f,
                    "got {paths} paths but {values} expected values; counts must match"
                )
            }
            Self::Path(e) => write!(f, "{e}"),
            Self::BadTypeSpec { path, source } => {
                write!(f, "bad type spec for path \"{path}\": {source}")
            }
        }
    }
}

impl std::error::Error for CheckError {}

impl From<PathError> for CheckError {
    fn from(e: PathError) -> Self {
        Self::Path(e)
    }
}
