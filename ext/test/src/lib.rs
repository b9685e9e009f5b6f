//! dotcheck-test: fixtures for conformance testing
//!
//! Canned responses and sample documents shaped like the APIs the checks
//! were built against: an Airflow-style DAG listing and a pet-store-style
//! inventory. The conformance suites under `tests/` exercise the whole
//! pipeline through these fixtures.
//!
//! # Example
//!
//! ```
//! use dotcheck_test::prelude::*;
//!
//! let resp = dag_listing_response();
//! let body = validate_response_json(&resp).unwrap();
//! assert_eq!(body["total_entries"], serde_json::json!(2));
//! ```

use serde_json::{json, Value};

use dotcheck_http::RawResponse;

/// An Airflow-style DAG listing document.
///
/// Two DAGs, one paused, with nested tag lists and a nullable
/// `schedule_interval.value` on the second entry.
#[must_use]
pub fn dag_listing() -> Value {
    json!({
        "dags": [
            {
                "dag_id": "etl_daily",
                "is_paused": false,
                "schedule_interval": {"type": "cron", "value": "0 3 * * *"},
                "tags": [{"name": "etl"}, {"name": "daily"}]
            },
            {
                "dag_id": "manual_backfill",
                "is_paused": true,
                "schedule_interval": {"type": "none", "value": null},
                "tags": [{"name": "manual"}]
            }
        ],
        "total_entries": 2
    })
}

/// A pet-store-style inventory document.
#[must_use]
pub fn pet_listing() -> Value {
    json!([
        {"id": 1, "name": "doggie", "status": "available",
         "category": {"id": 10, "name": "dogs"}},
        {"id": 2, "name": "kitty", "status": "sold",
         "category": {"id": 20, "name": "cats"}}
    ])
}

/// A 200 response carrying the given document.
#[must_use]
pub fn ok_json(doc: &Value) -> RawResponse {
    RawResponse::ok(doc.to_string())
}

/// A response with the given status carrying the given document.
#[must_use]
pub fn json_with_status(status: u16, doc: &Value) -> RawResponse {
    RawResponse::with_status(status, doc.to_string())
}

/// A 200 response with [`dag_listing`] as the body and a realistic URL.
#[must_use]
pub fn dag_listing_response() -> RawResponse {
    RawResponse::builder()
        .status(200)
        .url("http://airflow.test/api/v1/dags?limit=100")
        .body(dag_listing().to_string())
        .build()
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        dag_listing, dag_listing_response, json_with_status, ok_json, pet_listing,
    };
    pub use dotcheck_http::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::*;
    use dotcheck::get_value;

    #[test]
    fn dag_listing_shape() {
        let doc = dag_listing();
        let ids = get_value(&doc, "dags.[*].dag_id").unwrap();
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn fixtures_round_trip_through_responses() {
        use dotcheck_http::HttpResponse;

        let resp = ok_json(&pet_listing());
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.json().unwrap(), pet_listing());

        let resp = json_with_status(404, &json!({"detail": "missing"}));
        assert_eq!(resp.status(), 404);
    }
}
