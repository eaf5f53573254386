#![no_main]

use libfuzzer_sys::fuzz_target;
use problem_normalizer::{CaughtError, ErrorResponse, normalize, normalize_value};
use serde_json::Value;

fuzz_target!(|data: &[u8]| {
    let problem = match serde_json::from_slice::<Value>(data) {
        // Parsed JSON is read as a whole caught error, and as a response payload
        Ok(value) => {
            let as_payload = normalize(&CaughtError::from_response(
                ErrorResponse::new(400).with_data(value.clone()),
            ));
            assert!(as_payload.status.is_some());
            normalize_value(&value)
        }
        Err(_) => normalize(&CaughtError::from_response(
            ErrorResponse::new(500).with_data(String::from_utf8_lossy(data).into_owned()),
        )),
    };

    assert!(problem.type_url.is_some());
    assert!(problem.title.is_some());
    assert!(problem.status.is_some());
    assert!(problem.detail.is_some());
    assert!(problem.timestamp.is_some());
    assert!(problem.correlation_id.is_some());
});
