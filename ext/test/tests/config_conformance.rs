//! Config conformance: declarative checks loaded from YAML/JSON behave
//! exactly like their hand-built counterparts.

use serde_json::json;

use dotcheck_http::{CheckConfig, CheckError};
use dotcheck_test::prelude::*;

const DAG_CHECK_YAML: &str = r"
expected_status: 200
non_empty: true
required_keys:
  - dags.[*].dag_id
  - total_entries
key_types:
  dags: array
  dags.[*].is_paused: bool
  dags.[*].schedule_interval.value: string | null
  total_entries: int
";

#[test]
fn yaml_config_validates_dag_listing() {
    let config: CheckConfig = serde_yaml::from_str(DAG_CHECK_YAML).unwrap();
    let check = config.compile().unwrap();

    let body = check.validate(&dag_listing_response()).unwrap();
    assert_eq!(body["total_entries"], json!(2));
}

#[test]
fn yaml_config_catches_type_drift() {
    let config: CheckConfig = serde_yaml::from_str(DAG_CHECK_YAML).unwrap();
    let check = config.compile().unwrap();

    // A regression: total_entries comes back as a string.
    let mut doc = dag_listing();
    doc["total_entries"] = json!("2");

    let err = check.validate(&ok_json(&doc)).unwrap_err();
    assert!(matches!(err, CheckError::TypeMismatch { .. }));
}

#[test]
fn yaml_config_tolerates_partially_missing_wildcard_branches() {
    let config: CheckConfig = serde_yaml::from_str(DAG_CHECK_YAML).unwrap();
    let check = config.compile().unwrap();

    // One DAG loses its id: the wildcard match list shrinks but the
    // remaining match still satisfies the required key.
    let mut doc = dag_listing();
    doc["dags"][0].as_object_mut().unwrap().remove("dag_id");
    assert!(check.validate(&ok_json(&doc)).is_ok());

    // An explicit null, by contrast, fails with the element index.
    let mut doc = dag_listing();
    doc["dags"][0]["dag_id"] = json!(null);
    let err = check.validate(&ok_json(&doc)).unwrap_err();
    assert!(matches!(
        err,
        CheckError::MissingValue { index: Some(1), .. }
    ));
}

#[test]
fn yaml_config_missing_all_required_values_fails() {
    let config: CheckConfig = serde_yaml::from_str(DAG_CHECK_YAML).unwrap();
    let check = config.compile().unwrap();

    let doc = json!({"dags": [], "total_entries": 0});
    let err = check.validate(&ok_json(&doc)).unwrap_err();
    assert!(matches!(
        err,
        CheckError::MissingValue { index: None, .. }
    ));
}

#[test]
fn json_config_round_trip() {
    let config: CheckConfig = serde_json::from_value(json!({
        "expected_status": 404,
        "required_keys": ["detail"]
    }))
    .unwrap();
    let check = config.compile().unwrap();

    let resp = json_with_status(404, &json!({"detail": "not found"}));
    assert!(check.validate(&resp).is_ok());

    let resp = json_with_status(200, &json!({"detail": "not found"}));
    assert!(matches!(
        check.validate(&resp).unwrap_err(),
        CheckError::Status { expected: 404, actual: 200, .. }
    ));
}

#[test]
fn bad_yaml_config_fails_at_load_time() {
    let yaml = r"
required_keys:
  - dags..[*]
";
    let config: CheckConfig = serde_yaml::from_str(yaml).unwrap();
    let err = config.compile().unwrap_err();
    assert!(err.is_usage());
}
