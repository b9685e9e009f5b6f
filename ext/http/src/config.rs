//! Config types for declarative response checks.
//!
//! These types mirror the runtime [`ResponseCheck`] but are
//! serde-deserializable, so a check can live next to the test data in
//! JSON or YAML and compile into a runtime check at load time.
//!
//! # Relationship to runtime types
//!
//! | Config field | Runtime call |
//! |--------------|--------------|
//! | `expected_status` | [`ResponseCheck::status`] |
//! | `non_empty` | [`ResponseCheck::non_empty`] |
//! | `required_keys` | [`ResponseCheck::require`] |
//! | `key_types` (path → `"string \| null"`) | [`ResponseCheck::key_type`] |
//!
//! Compilation validates every path and every type-spec string, so a bad
//! config fails at load time, not mid-test.
//!
//! # Example
//!
//! ```
//! use dotcheck_http::CheckConfig;
//!
//! let yaml = r#"
//! expected_status: 200
//! non_empty: true
//! required_keys:
//!   - dags.[*].dag_id
//!   - total_entries
//! key_types:
//!   dags: array
//!   dags.[*].is_paused: bool
//!   total_entries: int
//! "#;
//!
//! let config: CheckConfig = serde_yaml::from_str(yaml).unwrap();
//! let check = config.compile().unwrap();
//! # let _ = check;
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

use dotcheck::{Path, TypeSpec};

use crate::{CheckError, ResponseCheck};

fn default_status() -> u16 {
    200
}

/// Declarative form of a [`ResponseCheck`].
///
/// Deserializes from JSON or YAML; [`compile`](Self::compile) turns it
/// into the runtime check. `key_types` values use the type-spec display
/// syntax (`"int"`, `"string | null"`, ...). A `BTreeMap` keeps check
/// order deterministic across runs.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckConfig {
    /// Expected HTTP status code (default 200).
    #[serde(default = "default_status")]
    pub expected_status: u16,

    /// Require a non-empty object/array body.
    #[serde(default)]
    pub non_empty: bool,

    /// Paths that must resolve to non-null values.
    #[serde(default)]
    pub required_keys: Vec<String>,

    /// Path → allowed-kinds spec string.
    #[serde(default)]
    pub key_types: BTreeMap<String, String>,
}

impl CheckConfig {
    /// Compile into a runtime [`ResponseCheck`], validating all paths and
    /// type-spec strings.
    ///
    /// # Errors
    ///
    /// [`CheckError::Path`] for a malformed path,
    /// [`CheckError::BadTypeSpec`] for an unparseable spec string.
    pub fn compile(&self) -> Result<ResponseCheck, CheckError> {
        let mut check = ResponseCheck::new().status(self.expected_status);
        if self.non_empty {
            check = check.non_empty();
        }

        for raw in &self.required_keys {
            Path::parse(raw)?;
            check = check.require(raw.clone());
        }

        for (raw, spec_str) in &self.key_types {
            Path::parse(raw)?;
            let spec: TypeSpec = spec_str.parse().map_err(
                |e: dotcheck::TypeSpecParseError| CheckError::BadTypeSpec {
                    path: raw.clone(),
                    source: e.to_string(),
                },
            )?;
            check = check.key_type(raw.clone(), spec);
        }

        Ok(check)
    }
}
