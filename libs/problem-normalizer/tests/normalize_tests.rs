#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end normalization of caught HTTP client errors.

use bytes::Bytes;
use chrono::{TimeZone, Utc};
use problem_normalizer::{
    CaughtError, ErrorResponse, NETWORK_ERROR_DETAIL, ProblemDetail, ProblemNormalizer,
    UNKNOWN_ERROR_DETAIL, get_validation_errors, normalize, normalize_value,
};
use serde_json::{Value, json};

fn assert_well_formed(problem: &ProblemDetail) {
    assert!(problem.type_url.is_some(), "type missing: {problem:?}");
    assert!(problem.title.is_some(), "title missing: {problem:?}");
    assert!(problem.status.is_some(), "status missing: {problem:?}");
    assert!(problem.detail.is_some(), "detail missing: {problem:?}");
    assert!(problem.timestamp.is_some(), "timestamp missing: {problem:?}");
    assert!(
        problem.correlation_id.is_some(),
        "correlationId missing: {problem:?}"
    );
}

#[test]
fn every_input_shape_yields_a_well_formed_record() {
    let inputs = [
        Value::Null,
        json!("boom"),
        json!(17),
        json!([]),
        json!({}),
        json!({"code": "NETWORK_ERROR"}),
        json!({"response": null}),
        json!({"response": {}}),
        json!({"response": {"status": "oops", "data": null}}),
        json!({"response": {"status": 404, "data": {"type": null, "title": 3}}}),
        json!({"response": {"status": 404, "data": {"status": 1_000_000}}}),
        json!({"response": {"status": 400, "data": {"message": ["a", "b"]}}}),
        json!({"response": {"data": {"errors": "nope", "violations": [1]}}}),
        json!({"response": {"data": 0}}),
        json!({"response": {"data": ""}}),
        json!({"response": {"data": true}}),
    ];

    for input in &inputs {
        assert_well_formed(&normalize_value(input));
    }
}

#[test]
fn well_formed_payload_is_overlaid_on_defaults() {
    let problem = normalize_value(&json!({
        "response": {
            "status": 404,
            "data": {
                "type": "https://api.shopeazy.com/problems/not-found",
                "status": 404,
                "detail": "not found",
                "productId": "P-42"
            }
        }
    }));

    assert_eq!(problem.status, Some(404));
    assert_eq!(problem.detail.as_deref(), Some("not found"));
    assert_eq!(problem.correlation_id.as_deref(), Some("unknown"));
    assert_eq!(
        problem.type_url.as_deref(),
        Some("https://api.shopeazy.com/problems/not-found")
    );
    assert_eq!(problem.title.as_deref(), Some("Unknown Error"));
    assert_eq!(problem.extensions.get("productId"), Some(&json!("P-42")));
}

#[test]
fn string_payload_maps_to_detail_with_response_status() {
    let problem = normalize(&CaughtError::from_response(
        ErrorResponse::new(422).with_data("plain text body"),
    ));

    assert_eq!(problem.status, Some(422));
    assert_eq!(problem.detail.as_deref(), Some("plain text body"));
    assert_eq!(problem.title.as_deref(), Some("Unknown Error"));
}

#[test]
fn message_payload_without_status_defaults_to_500() {
    let problem = normalize_value(&json!({
        "response": {"data": {"message": "bad request"}}
    }));

    assert_eq!(problem.status, Some(500));
    assert_eq!(problem.detail.as_deref(), Some("bad request"));
}

#[test]
fn missing_response_is_a_network_error() {
    let problem = normalize(&CaughtError::default());

    assert_eq!(problem.status, Some(0));
    assert!(problem.type_url.as_deref().unwrap().contains("network-error"));
    assert_eq!(problem.title.as_deref(), Some("Network Error"));
    assert_eq!(problem.detail.as_deref(), Some(NETWORK_ERROR_DETAIL));
    assert!(!problem.is_client_error());
    assert!(!problem.is_server_error());
}

#[test]
fn network_marker_wins_over_unrecognized_payload() {
    let problem = normalize_value(&json!({
        "code": "NETWORK_ERROR",
        "response": {"status": 503, "data": {"unexpected": "shape"}}
    }));

    assert_eq!(problem.status, Some(0));
    assert!(problem.is_type("network-error"));
}

#[test]
fn network_marker_does_not_override_recognized_payload() {
    let problem = normalize_value(&json!({
        "code": "NETWORK_ERROR",
        "response": {"status": 503, "data": "Service Unavailable"}
    }));

    assert_eq!(problem.status, Some(503));
    assert_eq!(problem.detail.as_deref(), Some("Service Unavailable"));
}

#[test]
fn response_without_payload_returns_default_record() {
    let problem = normalize_value(&json!({"response": {"status": 502}}));

    assert_eq!(problem.status, Some(500));
    assert!(problem.is_type("unknown-error"));
    assert_eq!(problem.detail.as_deref(), Some(UNKNOWN_ERROR_DETAIL));
}

#[test]
fn validation_problem_from_backend() {
    let problem = normalize_value(&json!({
        "response": {
            "status": 400,
            "data": {
                "type": "https://api.shopeazy.com/problems/validation-error",
                "title": "Validation Failed",
                "status": 400,
                "detail": "Request validation failed on 2 field(s)",
                "instance": "/api/users",
                "timestamp": "2024-05-01T12:00:00Z",
                "correlationId": "3f1c",
                "errors": {
                    "email": ["must be a well-formed email address"],
                    "password": ["size must be between 8 and 64", "must contain a digit"]
                }
            }
        }
    }));

    assert!(problem.is_type("validation-error"));
    assert!(problem.is_client_error());
    assert_eq!(problem.correlation_id.as_deref(), Some("3f1c"));
    assert_eq!(problem.timestamp.as_deref(), Some("2024-05-01T12:00:00Z"));

    let errors = get_validation_errors(&problem);
    assert_eq!(errors.len(), 2);
    assert_eq!(errors["password"].len(), 2);
    assert_eq!(
        problem.error_message(),
        "Request validation failed on 2 field(s)"
    );
}

#[test]
fn constraint_violations_are_exposed_as_field_errors() {
    let problem = normalize_value(&json!({
        "response": {
            "status": 400,
            "data": {
                "type": "https://api.shopeazy.com/problems/constraint-violation",
                "title": "Constraint Violation",
                "status": 400,
                "violations": {"updateQuantity.quantity": "must be greater than 0"}
            }
        }
    }));

    let errors = problem.validation_errors();
    assert_eq!(
        errors["updateQuantity.quantity"],
        vec!["must be greater than 0".to_owned()]
    );
}

#[test]
fn renormalizing_a_normalized_record_is_idempotent() {
    let normalizer = ProblemNormalizer::default();
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    let originals = [
        CaughtError::default(),
        CaughtError::from_response(ErrorResponse::new(422).with_data("plain text body")),
        CaughtError::from_response(
            ErrorResponse::new(409).with_data(json!({"title": "Seller Already Exists", "status": 409, "sellerId": "S-1"})),
        ),
    ];

    for original in &originals {
        let first = normalizer.normalize_at(original, now);
        let rewrapped = CaughtError::from_response(ErrorResponse {
            status: first.status,
            data: Some(serde_json::to_value(&first).unwrap()),
            correlation_id: None,
        });
        let later = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let second = normalizer.normalize_at(&rewrapped, later);
        assert_eq!(first, second);
    }
}

#[test]
fn buffered_http_response_is_normalized() {
    let response = http::Response::builder()
        .status(http::StatusCode::CONFLICT)
        .header(http::header::CONTENT_TYPE, "application/problem+json")
        .header("x-correlation-id", "corr-7")
        .body(Bytes::from_static(
            br#"{"type":"https://api.shopeazy.com/problems/company-name-taken","title":"Company Name Taken","status":400,"companyName":"Acme"}"#,
        ))
        .unwrap();

    let problem = normalize(&CaughtError::from(response));
    assert_eq!(problem.status, Some(400));
    assert_eq!(problem.correlation_id.as_deref(), Some("corr-7"));
    assert_eq!(problem.extensions.get("companyName"), Some(&json!("Acme")));
    // No `detail` in the body, so the default detail survives the overlay
    assert_eq!(problem.detail.as_deref(), Some(UNKNOWN_ERROR_DETAIL));
    assert_eq!(problem.error_message(), UNKNOWN_ERROR_DETAIL);
}

#[test]
fn buffered_http_response_detail_drives_error_message() {
    let response = http::Response::builder()
        .status(http::StatusCode::BAD_REQUEST)
        .header(http::header::CONTENT_TYPE, "application/problem+json")
        .body(Bytes::from_static(
            br#"{"type":"https://api.shopeazy.com/problems/company-name-taken","title":"Company Name Taken","status":400,"detail":"Company name 'Acme' is already registered"}"#,
        ))
        .unwrap();

    let problem = normalize(&CaughtError::from(response));
    assert_eq!(
        problem.error_message(),
        "Company name 'Acme' is already registered"
    );
    assert_eq!(problem.correlation_id.as_deref(), Some("unknown"));
}

#[test]
fn integral_float_response_status_is_kept() {
    let problem = normalize_value(&json!({
        "response": {"status": 422.0, "data": "plain"}
    }));

    assert_eq!(problem.status, Some(422));
    assert_eq!(problem.detail.as_deref(), Some("plain"));
}

#[test]
fn normalizer_can_be_shared_across_threads() {
    let normalizer = std::sync::Arc::new(ProblemNormalizer::default());

    let handles: Vec<_> = (0..4_u16)
        .map(|i| {
            let normalizer = std::sync::Arc::clone(&normalizer);
            std::thread::spawn(move || {
                normalizer.normalize(&CaughtError::from_response(
                    ErrorResponse::new(400 + i).with_data("legacy"),
                ))
            })
        })
        .collect();

    for (i, handle) in (0..4_u16).zip(handles) {
        assert_eq!(handle.join().unwrap().status, Some(400 + i));
    }
}
