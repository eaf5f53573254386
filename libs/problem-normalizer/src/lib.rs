#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Normalization of HTTP client failures into RFC 7807 Problem Details
//!
//! Servers answer failed requests in many shapes: proper problem documents,
//! legacy plain-text bodies, `{ "message": ... }` objects, or nothing at all
//! when the connection never succeeded. This crate turns all of them into one
//! [`ProblemDetail`] with `type`, `title`, `status`, `detail`, `timestamp` and
//! `correlationId` always set.
//!
//! Normalization is a two-step process:
//! 1. [`classify`] decides what the caught error looks like
//! 2. [`ProblemNormalizer`] overlays the matching fields onto a default record
//!
//! Neither step can fail.
//!
//! # Example
//!
//! ```
//! use problem_normalizer::{CaughtError, ErrorResponse, normalize};
//!
//! let error = CaughtError::from_response(
//!     ErrorResponse::new(422).with_data("plain text body"),
//! );
//! let problem = normalize(&error);
//!
//! assert_eq!(problem.status, Some(422));
//! assert_eq!(problem.error_message(), "plain text body");
//! assert!(problem.is_client_error());
//! ```

mod caught;
mod classify;
mod config;
mod error;
mod normalizer;

pub use caught::{CORRELATION_ID_HEADER, CaughtError, ErrorResponse};
pub use classify::{Classification, classify, is_truthy};
pub use config::{
    CONFIG_SECTION, DEFAULT_CORRELATION_ID, DEFAULT_NETWORK_ERROR_CODE, ENV_PREFIX,
    NormalizerConfig,
};
pub use error::ConfigError;
pub use normalizer::{
    NETWORK_ERROR_DETAIL, ProblemNormalizer, UNKNOWN_ERROR_DETAIL, format_timestamp,
};

pub use problem_details::{
    self, FieldErrors, FieldViolations, GENERIC_ERROR_MESSAGE, ProblemDetail, get_error_message,
    get_validation_errors, is_client_error, is_problem_type, is_server_error,
};

/// Normalize `error` with the default configuration.
pub fn normalize(error: &CaughtError) -> ProblemDetail {
    ProblemNormalizer::default().normalize(error)
}

/// Normalize any JSON value shaped like an HTTP client error.
///
/// See [`CaughtError::from_value`] for how the value is read.
pub fn normalize_value(value: &serde_json::Value) -> ProblemDetail {
    normalize(&CaughtError::from_value(value))
}
