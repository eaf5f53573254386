//! RFC 7807 Problem Details for HTTP client error handling.
//!
//! This crate provides pure data types, with no dependencies on HTTP
//! frameworks. It includes:
//! - The `ProblemDetail` record, with pass-through extension members
//! - The catalog of well-known problem types (`ProblemDef`)
//! - Accessors for presentation layers (message, validation errors, 4xx/5xx)
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod accessors;
pub mod catalog;
pub mod problem;

// Re-export commonly used types
pub use accessors::{
    DEFAULT_STATUS, GENERIC_ERROR_MESSAGE, get_error_message, get_validation_errors,
    is_client_error, is_problem_type, is_server_error,
};
pub use catalog::{DEFAULT_PROBLEM_BASE_URI, ProblemDef};
pub use problem::{
    APPLICATION_PROBLEM_JSON, FieldErrors, FieldViolations, ProblemDetail, status_from_number,
};
