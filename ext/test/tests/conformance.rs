//! End-to-end conformance: the documented behavior of path extraction and
//! response validation, exercised through realistic fixtures.

use serde_json::{json, Value};

use dotcheck::{get_value, get_value_unique, JsonKind, Path, PathError, TypeSpec};
use dotcheck_http::{
    assert_json_value, assert_json_values, validate_response_json, CheckError, ResponseCheck,
};
use dotcheck_test::prelude::*;

// ═══════════════════════════════════════════════════════════════════════════════
// Extraction semantics
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn wildcard_order_preservation() {
    let doc = json!({"a": [{"v": 1}, {"v": 2}, {"v": 3}]});
    let result = get_value(&doc, "a.[*].v").unwrap();
    assert_eq!(result.to_vec(), vec![&json!(1), &json!(2), &json!(3)]);
}

#[test]
fn tolerant_absence_never_raises() {
    // Missing branches contribute nothing; present-but-null leaves are kept.
    let doc = json!({"a": [{"v": 1}, {}]});
    assert_eq!(get_value(&doc, "a.[*].v").unwrap().to_vec(), vec![&json!(1)]);

    let doc = json!({"a": [{"v": 1}, {"v": null}]});
    assert_eq!(
        get_value(&doc, "a.[*].v").unwrap().to_vec(),
        vec![&json!(1), &Value::Null]
    );
}

#[test]
fn unique_semantics() {
    let doc = json!({"a": [{"v": 1}, {"v": 1}, {"v": null}]});

    let all = get_value(&doc, "a.[*].v").unwrap();
    assert_eq!(all.to_vec(), vec![&json!(1), &json!(1), &Value::Null]);

    let unique = get_value_unique(&doc, "a.[*].v").unwrap();
    assert_eq!(unique.to_vec(), vec![&json!(1)]);
}

#[test]
fn non_wildcard_paths_are_deterministic_singles() {
    let doc = dag_listing();
    let result = get_value(&doc, "dags.[0].dag_id").unwrap();
    assert!(!result.is_many());
    assert_eq!(result.as_single(), Some(&json!("etl_daily")));

    let missing = get_value(&doc, "dags.[9].dag_id").unwrap();
    assert!(!missing.is_many());
    assert_eq!(missing.as_single(), None);
}

#[test]
fn extraction_is_idempotent_over_immutable_doc() {
    let doc = dag_listing();
    let path = Path::parse("dags.[*].tags.[0].name").unwrap();
    let a = path.resolve(&doc);
    let b = path.resolve(&doc);
    assert_eq!(a, b);
    assert_eq!(a.to_vec(), vec![&json!("etl"), &json!("manual")]);
}

#[test]
fn syntax_rejection_before_traversal() {
    let doc = json!({"a": 1});
    for bad in ["a..b", "a.[1:2]", "a[0]"] {
        let err = get_value(&doc, bad).unwrap_err();
        assert!(
            matches!(
                err,
                PathError::EmptySegment { .. }
                    | PathError::BadIndexSegment { .. }
                    | PathError::BracketInField { .. }
            ),
            "path {bad:?} produced {err:?}"
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Response validation
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn end_to_end_dag_scenario() {
    let resp = dag_listing_response();

    let body = ResponseCheck::new()
        .require_all(["dags.[*].dag_id", "total_entries"])
        .key_type("dags.[*].is_paused", JsonKind::Bool)
        .key_type("total_entries", JsonKind::Int)
        .key_type(
            "dags.[*].schedule_interval.value",
            TypeSpec::nullable(JsonKind::String),
        )
        .validate(&resp)
        .unwrap();

    // Body is returned unchanged for further assertions.
    assert_eq!(body, dag_listing());
}

#[test]
fn status_mismatch_scenario() {
    let resp = json_with_status(404, &json!({"detail": "not found"}));
    let err = validate_response_json(&resp).unwrap_err();
    match err {
        CheckError::Status {
            expected, actual, ..
        } => {
            assert_eq!((expected, actual), (200, 404));
        }
        other => panic!("expected Status, got {other:?}"),
    }
}

#[test]
fn type_validation_over_wildcard_names_offender() {
    let resp = ok_json(&json!({"items": [{"n": "x"}, {"n": 5}]}));
    let err = ResponseCheck::new()
        .key_type("items.[*].n", JsonKind::String)
        .validate(&resp)
        .unwrap_err();
    match err {
        CheckError::TypeMismatch { index, actual, .. } => {
            assert_eq!(index, Some(2));
            assert_eq!(actual, JsonKind::Int);
        }
        other => panic!("expected TypeMismatch, got {other:?}"),
    }
}

#[test]
fn required_key_wildcard_null_check_names_offender() {
    let resp = ok_json(&json!({"items": [{"n": "x"}, {"n": null}]}));
    let err = ResponseCheck::new()
        .require("items.[*].n")
        .validate(&resp)
        .unwrap_err();
    match err {
        CheckError::MissingValue { index, path, .. } => {
            assert_eq!(index, Some(2));
            assert_eq!(path, "items.[*].n");
        }
        other => panic!("expected MissingValue, got {other:?}"),
    }
}

#[test]
fn wildcard_rejected_in_value_asserts() {
    // Garbage response proves no HTTP/JSON inspection happened.
    let resp = json_with_status(500, &json!("unused"));
    let err = assert_json_value(&resp, "items.[*].n", &json!("x"), 200).unwrap_err();
    assert!(matches!(err, CheckError::WildcardForbidden { .. }));
    assert!(err.is_usage());
}

#[test]
fn parallel_value_asserts() {
    let resp = dag_listing_response();
    assert_json_values(
        &resp,
        &["dags.[0].dag_id", "dags.[1].is_paused", "total_entries"],
        &[json!("etl_daily"), json!(true), json!(2)],
        200,
    )
    .unwrap();
}

#[test]
fn usage_errors_are_distinguishable_from_data_failures() {
    let resp = dag_listing_response();

    let usage = assert_json_values(&resp, &["total_entries"], &[], 200).unwrap_err();
    assert!(usage.is_usage());

    let data = ResponseCheck::new()
        .require("no_such_key")
        .validate(&resp)
        .unwrap_err();
    assert!(!data.is_usage());
}

#[test]
fn pet_listing_array_body() {
    // Top-level arrays validate the same as objects.
    let resp = ok_json(&pet_listing());
    let body = ResponseCheck::new()
        .non_empty()
        .require("[*].id")
        .key_type("[*].status", JsonKind::String)
        .key_type("[*].category.id", JsonKind::Int)
        .validate(&resp)
        .unwrap();
    assert_eq!(body[0]["name"], json!("doggie"));
}
