//! `ResponseCheck` — composed response validation.
//!
//! The runtime form of "validate this response": status code, JSON
//! decoding, optional non-emptiness, required paths, and per-path type
//! checks, applied in that order with short-circuiting. Mirrors the
//! check sequence QA suites chain by hand, with every failure carrying
//! enough context to diagnose without re-running the request.

use serde_json::Value;
use tracing::debug;

use dotcheck::{JsonKind, MatchSet, Path, TypeSpec};

use crate::{CheckError, HttpResponse};

/// Maximum characters of raw text embedded in a failure message.
pub const MAX_PREVIEW_LEN: usize = 1000;

/// Truncate text for inclusion in a failure message.
///
/// Caps at [`MAX_PREVIEW_LEN`] characters (not bytes, so multi-byte
/// content stays valid) with a trailing ellipsis.
#[must_use]
pub fn truncate(text: &str) -> String {
    match text.char_indices().nth(MAX_PREVIEW_LEN) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

/// A composed set of checks to run against one response.
///
/// Build once, then [`validate`](Self::validate). Checks run in a fixed
/// order (status, decode, non-empty, required paths, types) and stop at
/// the first failure. On success the parsed body is returned for further
/// caller-side assertions.
///
/// # Example
///
/// ```
/// use dotcheck_http::prelude::*;
/// use serde_json::json;
///
/// let resp = RawResponse::ok(json!({"items": [{"n": 1}]}).to_string());
///
/// let body = ResponseCheck::new()
///     .non_empty()
///     .require("items.[*].n")
///     .key_type_str("items", "array")?
///     .validate(&resp)?;
/// assert_eq!(body["items"][0]["n"], json!(1));
/// # Ok::<(), dotcheck_http::CheckError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ResponseCheck {
    expected_status: u16,
    non_empty: bool,
    required: Vec<String>,
    key_types: Vec<(String, TypeSpec)>,
}

impl Default for ResponseCheck {
    fn default() -> Self {
        Self {
            expected_status: 200,
            non_empty: false,
            required: Vec::new(),
            key_types: Vec::new(),
        }
    }
}

impl ResponseCheck {
    /// A check expecting HTTP 200 and a decodable JSON body.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Expect this status code instead of 200.
    #[must_use]
    pub fn status(mut self, expected: u16) -> Self {
        self.expected_status = expected;
        self
    }

    /// Require the decoded body to be a non-empty object or array.
    #[must_use]
    pub fn non_empty(mut self) -> Self {
        self.non_empty = true;
        self
    }

    /// Require `path` to resolve to at least one non-null value.
    ///
    /// For wildcard paths every matched element must be non-null and the
    /// match list must not be empty.
    #[must_use]
    pub fn require(mut self, path: impl Into<String>) -> Self {
        self.required.push(path.into());
        self
    }

    /// Require every path in the iterator (see [`require`](Self::require)).
    #[must_use]
    pub fn require_all<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Require values at `path` to be one of the kinds in `spec`.
    ///
    /// Wildcard paths check every matched element; plain paths check the
    /// single resolved value (a missing value counts as null).
    #[must_use]
    pub fn key_type(mut self, path: impl Into<String>, spec: impl Into<TypeSpec>) -> Self {
        self.key_types.push((path.into(), spec.into()));
        self
    }

    /// Like [`key_type`](Self::key_type), parsing the spec from its
    /// display syntax (`"string"`, `"string | null"`, ...).
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::BadTypeSpec`] when the spec string does not
    /// name JSON kinds.
    pub fn key_type_str(self, path: impl Into<String>, spec: &str) -> Result<Self, CheckError> {
        let path = path.into();
        let spec: TypeSpec =
            spec.parse()
                .map_err(|e: dotcheck::TypeSpecParseError| CheckError::BadTypeSpec {
                    path: path.clone(),
                    source: e.to_string(),
                })?;
        Ok(self.key_type(path, spec))
    }

    /// Run the composed checks against `resp`.
    ///
    /// # Errors
    ///
    /// The first failing check is returned as [`CheckError`]; see the
    /// type-level docs for the order.
    pub fn validate<R: HttpResponse>(&self, resp: &R) -> Result<Value, CheckError> {
        // 1. Status code, before any body inspection.
        if resp.status() != self.expected_status {
            return Err(CheckError::Status {
                expected: self.expected_status,
                actual: resp.status(),
                url: resp.url().to_string(),
                body: truncate(resp.text()),
            });
        }

        // 2. Decode.
        let body = resp.json().map_err(|e| CheckError::InvalidJson {
            source: e.to_string(),
            body: truncate(resp.text()),
        })?;
        let preview = truncate(&body.to_string());

        // 3. Non-empty, when requested. Scalars count as empty: a bare
        // number or string is never the shape a listing endpoint returns.
        if self.non_empty {
            let filled = match &body {
                Value::Object(map) => !map.is_empty(),
                Value::Array(items) => !items.is_empty(),
                _ => false,
            };
            if !filled {
                return Err(CheckError::EmptyBody {
                    body: preview.clone(),
                });
            }
        }

        // 4. Required paths.
        for raw in &self.required {
            let path = Path::parse(raw)?;
            check_required(&path, &body, &preview)?;
        }

        // 5. Type checks.
        for (raw, spec) in &self.key_types {
            let path = Path::parse(raw)?;
            check_types(&path, spec, &body, &preview)?;
        }

        Ok(body)
    }
}

/// A required path must resolve to at least one non-null value.
fn check_required(path: &Path, body: &Value, preview: &str) -> Result<(), CheckError> {
    match path.resolve(body) {
        MatchSet::One(Some(_)) => Ok(()),
        MatchSet::One(None) => Err(CheckError::MissingValue {
            path: path.to_string(),
            index: None,
            body: preview.to_string(),
        }),
        MatchSet::Many(values) => {
            if values.is_empty() {
                return Err(CheckError::MissingValue {
                    path: path.to_string(),
                    index: None,
                    body: preview.to_string(),
                });
            }
            for (idx, value) in values.iter().enumerate() {
                if value.is_null() {
                    return Err(CheckError::MissingValue {
                        path: path.to_string(),
                        index: Some(idx + 1),
                        body: preview.to_string(),
                    });
                }
            }
            Ok(())
        }
    }
}

/// Every value a path resolves to must be one of the allowed kinds.
fn check_types(
    path: &Path,
    spec: &TypeSpec,
    body: &Value,
    preview: &str,
) -> Result<(), CheckError> {
    let mismatch = |index: Option<usize>, actual: JsonKind, value: String| {
        debug!(
            path = %path,
            ?index,
            expected = %spec,
            %actual,
            "type check failed"
        );
        CheckError::TypeMismatch {
            path: path.to_string(),
            index,
            expected: spec.clone(),
            actual,
            value,
            body: preview.to_string(),
        }
    };

    match path.resolve(body) {
        MatchSet::Many(values) => {
            for (idx, value) in values.iter().enumerate() {
                if !spec.allows(value) {
                    return Err(mismatch(
                        Some(idx + 1),
                        JsonKind::of(value),
                        truncate(&value.to_string()),
                    ));
                }
            }
            Ok(())
        }
        MatchSet::One(Some(value)) => {
            if spec.allows(value) {
                Ok(())
            } else {
                Err(mismatch(
                    None,
                    JsonKind::of(value),
                    truncate(&value.to_string()),
                ))
            }
        }
        // Missing or explicit null: acceptable only if the spec says so.
        MatchSet::One(None) => {
            if spec.allows_kind(JsonKind::Null) {
                Ok(())
            } else {
                Err(mismatch(None, JsonKind::Null, "null".to_string()))
            }
        }
    }
}

/// Validate status code (200) and JSON decodability, returning the body.
///
/// The minimal entry point; use [`ResponseCheck`] for required-path and
/// type checks.
///
/// # Errors
///
/// [`CheckError::Status`] or [`CheckError::InvalidJson`].
pub fn validate_response_json<R: HttpResponse>(resp: &R) -> Result<Value, CheckError> {
    ResponseCheck::new().validate(resp)
}

/// Assert that the value at `path` equals `expected`.
///
/// Exact-position comparison only: any `[*]` segment is rejected before
/// the response is touched. Status (`expected_status`) and JSON validity
/// are checked first via [`ResponseCheck`].
///
/// # Errors
///
/// [`CheckError::WildcardForbidden`] / [`CheckError::Path`] for misuse,
/// otherwise the first failing response check or
/// [`CheckError::ValueMismatch`].
pub fn assert_json_value<R: HttpResponse>(
    resp: &R,
    path: &str,
    expected: &Value,
    expected_status: u16,
) -> Result<(), CheckError> {
    assert_json_values(resp, &[path], std::slice::from_ref(expected), expected_status)
}

/// Assert that values at several paths equal the expected values, positionally.
///
/// `paths` and `expected` must have the same length; all paths must be
/// wildcard-free. Both conditions are checked before any HTTP/JSON work.
///
/// # Errors
///
/// [`CheckError::ArityMismatch`], [`CheckError::WildcardForbidden`],
/// [`CheckError::Path`] for misuse; otherwise the first failing response
/// check or [`CheckError::ValueMismatch`].
pub fn assert_json_values<R: HttpResponse>(
    resp: &R,
    paths: &[&str],
    expected: &[Value],
    expected_status: u16,
) -> Result<(), CheckError> {
    if paths.len() != expected.len() {
        return Err(CheckError::ArityMismatch {
            paths: paths.len(),
            values: expected.len(),
        });
    }

    // Full usage validation before the response is inspected.
    let mut parsed = Vec::with_capacity(paths.len());
    for raw in paths {
        let path = Path::parse(raw)?;
        if path.has_wildcard() {
            return Err(CheckError::WildcardForbidden {
                path: (*raw).to_string(),
            });
        }
        parsed.push(path);
    }

    let body = ResponseCheck::new().status(expected_status).validate(resp)?;
    let preview = truncate(&body.to_string());

    for (path, want) in parsed.iter().zip(expected) {
        let actual = path.resolve(&body).as_single().cloned();
        if actual.as_ref() != Some(want) {
            return Err(CheckError::ValueMismatch {
                path: path.to_string(),
                expected: want.clone(),
                actual,
                body: preview.clone(),
            });
        }
    }

    Ok(())
}
