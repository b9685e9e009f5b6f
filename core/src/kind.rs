//! `JsonKind` and `TypeSpec` — runtime type classification for resolved values.
//!
//! The original dynamic checks ("value must be `str` or `None`") become an
//! explicit discriminated set: [`JsonKind`] names the seven runtime kinds a
//! JSON value can have, and [`TypeSpec`] is the set of kinds a given path
//! is allowed to resolve to.
//!
//! # Naming: Kind vs Spec
//!
//! - [`JsonKind`] = what a value *is* (classification of one `Value`)
//! - [`TypeSpec`] = what a value *may be* (config-level expectation)

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

/// Runtime kind of a JSON value.
///
/// Numbers split into `Int` and `Float`: a number representable as
/// `i64`/`u64` classifies as `Int`, everything else as `Float`. This keeps
/// "total_entries must be an integer" expressible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum JsonKind {
    /// JSON `null`.
    Null,
    /// JSON `true` / `false`.
    Bool,
    /// Integer-representable number.
    Int,
    /// Non-integer number.
    Float,
    /// JSON string.
    String,
    /// JSON array.
    Array,
    /// JSON object.
    Object,
}

impl JsonKind {
    /// Classify a value.
    ///
    /// # Example
    ///
    /// ```
    /// use dotcheck::JsonKind;
    /// use serde_json::json;
    ///
    /// assert_eq!(JsonKind::of(&json!(1)), JsonKind::Int);
    /// assert_eq!(JsonKind::of(&json!(1.5)), JsonKind::Float);
    /// assert_eq!(JsonKind::of(&json!(null)), JsonKind::Null);
    /// ```
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(n) => {
                if n.is_i64() || n.is_u64() {
                    Self::Int
                } else {
                    Self::Float
                }
            }
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// The spelling used by [`Display`](fmt::Display) and [`FromStr`].
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for JsonKind {
    type Err = TypeSpecParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "null" => Ok(Self::Null),
            "bool" | "boolean" => Ok(Self::Bool),
            "int" | "integer" => Ok(Self::Int),
            "float" | "number" => Ok(Self::Float),
            "string" | "str" => Ok(Self::String),
            "array" | "list" => Ok(Self::Array),
            "object" | "dict" => Ok(Self::Object),
            other => Err(TypeSpecParseError {
                token: other.to_string(),
            }),
        }
    }
}

/// The set of kinds a path's resolved value(s) may have.
///
/// Built fresh per validation call. The common cases are a single kind and
/// "kind or null" for nullable fields.
///
/// # Example
///
/// ```
/// use dotcheck::{JsonKind, TypeSpec};
/// use serde_json::json;
///
/// let spec = TypeSpec::nullable(JsonKind::String);
/// assert!(spec.allows(&json!("x")));
/// assert!(spec.allows(&json!(null)));
/// assert!(!spec.allows(&json!(5)));
/// assert_eq!(spec.to_string(), "string | null");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    allowed: Vec<JsonKind>,
}

impl TypeSpec {
    /// A spec allowing exactly one kind.
    #[must_use]
    pub fn of(kind: JsonKind) -> Self {
        Self {
            allowed: vec![kind],
        }
    }

    /// A spec allowing any of the given kinds.
    ///
    /// Duplicates are collapsed; order of first occurrence is kept for
    /// display.
    #[must_use]
    pub fn any_of(kinds: impl IntoIterator<Item = JsonKind>) -> Self {
        let mut allowed = Vec::new();
        for kind in kinds {
            if !allowed.contains(&kind) {
                allowed.push(kind);
            }
        }
        Self { allowed }
    }

    /// A spec allowing the given kind or null.
    ///
    /// The standard shape for nullable API fields.
    #[must_use]
    pub fn nullable(kind: JsonKind) -> Self {
        Self::any_of([kind, JsonKind::Null])
    }

    /// Whether the value's runtime kind is in the allowed set.
    #[must_use]
    pub fn allows(&self, value: &Value) -> bool {
        self.allows_kind(JsonKind::of(value))
    }

    /// Whether the kind is in the allowed set.
    #[inline]
    #[must_use]
    pub fn allows_kind(&self, kind: JsonKind) -> bool {
        self.allowed.contains(&kind)
    }

    /// The allowed kinds, in declaration order.
    #[must_use]
    pub fn kinds(&self) -> &[JsonKind] {
        &self.allowed
    }
}

impl From<JsonKind> for TypeSpec {
    fn from(kind: JsonKind) -> Self {
        Self::of(kind)
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.allowed.is_empty() {
            return f.write_str("(none)");
        }
        for (i, kind) in self.allowed.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{kind}")?;
        }
        Ok(())
    }
}

/// Parses the same surface syntax [`Display`](fmt::Display) produces:
/// kind names separated by `|`, e.g. `"string"` or `"string | null"`.
impl FromStr for TypeSpec {
    type Err = TypeSpecParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(TypeSpecParseError {
                token: s.to_string(),
            });
        }
        let kinds = trimmed
            .split('|')
            .map(|token| token.trim().parse::<JsonKind>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::any_of(kinds))
    }
}

/// A token in a type-spec string did not name a JSON kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpecParseError {
    /// The unrecognized token.
    pub token: String,
}

impl fmt::Display for TypeSpecParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown type name \"{}\", expected one of: null, bool, int, float, string, array, object",
            self.token
        )
    }
}

impl std::error::Error for TypeSpecParseError {}
