//! RFC 7807 Problem Details record (pure data model, no HTTP framework dependencies)

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::accessors;

/// Content type for Problem Details as per RFC 7807 / RFC 9457.
pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

/// Per-field validation errors: field name to ordered messages.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Constraint violations: field name to a single message.
pub type FieldViolations = BTreeMap<String, String>;

/// RFC 7807 Problem Details document.
///
/// Every member is optional so that any document a server sends can be
/// represented. Members this type does not recognize are kept in
/// [`extensions`](Self::extensions) and serialized back at the top level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct ProblemDetail {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_url: Option<String>,
    /// A short, human-readable summary of the problem type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// HTTP-status-like code. `0` marks a network failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// A human-readable explanation specific to this occurrence of the problem.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// A URI reference that identifies the specific occurrence of the problem.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    /// ISO-8601 time at which the record was produced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Request-tracing identifier.
    #[serde(
        rename = "correlationId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub correlation_id: Option<String>,
    /// Per-field validation errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
    /// Constraint violations, one message per field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub violations: Option<FieldViolations>,
    /// Domain-specific members passed through unmodified.
    #[serde(flatten)]
    pub extensions: Map<String, Value>,
}

impl ProblemDetail {
    /// Create an empty record with no members set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON document strictly.
    ///
    /// # Errors
    /// Returns `serde_json::Error` if the input is not JSON or a recognized
    /// member has the wrong type.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Build a record from an arbitrary JSON object without failing.
    ///
    /// Recognized members with an unexpected type (or `null`) are treated as
    /// absent. Everything else lands in [`extensions`](Self::extensions).
    pub fn from_json_object(object: &Map<String, Value>) -> Self {
        let mut problem = Self::new();
        for (key, value) in object {
            problem.set_member(key, value);
        }
        problem
    }

    pub fn with_type(mut self, type_url: impl Into<String>) -> Self {
        self.type_url = Some(type_url.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_instance(mut self, uri: impl Into<String>) -> Self {
        self.instance = Some(uri.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    pub fn with_errors(mut self, errors: FieldErrors) -> Self {
        self.errors = Some(errors);
        self
    }

    pub fn with_violations(mut self, violations: FieldViolations) -> Self {
        self.violations = Some(violations);
        self
    }

    /// Attach a member by its wire name.
    ///
    /// Recognized names (`type`, `status`, `correlationId`, ...) are routed to
    /// their typed fields with the same leniency as
    /// [`from_json_object`](Self::from_json_object).
    pub fn with_extension(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.set_member(key, &value.into());
        self
    }

    /// Merge `other` on top of `self`: members present in `other` win.
    pub fn overlay(mut self, other: Self) -> Self {
        let Self {
            type_url,
            title,
            status,
            detail,
            instance,
            timestamp,
            correlation_id,
            errors,
            violations,
            extensions,
        } = other;

        self.type_url = type_url.or(self.type_url.take());
        self.title = title.or(self.title.take());
        self.status = status.or(self.status);
        self.detail = detail.or(self.detail.take());
        self.instance = instance.or(self.instance.take());
        self.timestamp = timestamp.or(self.timestamp.take());
        self.correlation_id = correlation_id.or(self.correlation_id.take());
        self.errors = errors.or(self.errors.take());
        self.violations = violations.or(self.violations.take());
        self.extensions.extend(extensions);
        self
    }

    /// `status`, or 500 when absent.
    #[must_use]
    pub fn status_or_default(&self) -> u16 {
        accessors::status_or_default(self)
    }

    /// See [`accessors::get_validation_errors`].
    #[must_use]
    pub fn validation_errors(&self) -> Cow<'_, FieldErrors> {
        accessors::get_validation_errors(self)
    }

    /// See [`accessors::is_problem_type`].
    #[must_use]
    pub fn is_type(&self, type_tag: &str) -> bool {
        accessors::is_problem_type(self, type_tag)
    }

    /// See [`accessors::get_error_message`].
    #[must_use]
    pub fn error_message(&self) -> &str {
        accessors::get_error_message(self)
    }

    #[must_use]
    pub fn is_client_error(&self) -> bool {
        accessors::is_client_error(self)
    }

    #[must_use]
    pub fn is_server_error(&self) -> bool {
        accessors::is_server_error(self)
    }

    fn set_member(&mut self, key: &str, value: &Value) {
        match key {
            "type" => self.type_url = string_member(key, value),
            "title" => self.title = string_member(key, value),
            "status" => self.status = status_member(value),
            "detail" => self.detail = string_member(key, value),
            "instance" => self.instance = string_member(key, value),
            "timestamp" => self.timestamp = string_member(key, value),
            "correlationId" => self.correlation_id = string_member(key, value),
            "errors" => self.errors = errors_member(value),
            "violations" => self.violations = violations_member(value),
            _ => {
                self.extensions.insert(key.to_owned(), value.clone());
            }
        }
    }
}

fn string_member(key: &str, value: &Value) -> Option<String> {
    if let Value::String(s) = value {
        return Some(s.clone());
    }
    if !value.is_null() {
        tracing::debug!(member = key, "ignoring non-string problem member");
    }
    None
}

/// Read a JSON number as an HTTP status.
///
/// Integral floats such as `422.0` are accepted; fractions and values outside
/// `u16` are not.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::float_cmp)]
pub fn status_from_number(n: &Number) -> Option<u16> {
    if let Some(n) = n.as_u64() {
        return u16::try_from(n).ok();
    }
    n.as_f64()
        .filter(|f| f.trunc() == *f && (0.0..=f64::from(u16::MAX)).contains(f))
        .map(|f| f as u16)
}

fn status_member(value: &Value) -> Option<u16> {
    let status = match value {
        Value::Number(n) => status_from_number(n),
        Value::String(s) => s.trim().parse::<u16>().ok(),
        _ => None,
    };
    if status.is_none() && !value.is_null() {
        tracing::debug!(member = "status", "ignoring problem status that is not a u16");
    }
    status
}

fn errors_member(value: &Value) -> Option<FieldErrors> {
    let Value::Object(fields) = value else {
        if !value.is_null() {
            tracing::debug!(member = "errors", "ignoring errors member that is not an object");
        }
        return None;
    };

    let errors = fields
        .iter()
        .filter_map(|(field, messages)| {
            let messages = match messages {
                Value::Array(items) => items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_owned)
                    .collect(),
                Value::String(message) => vec![message.clone()],
                _ => return None,
            };
            Some((field.clone(), messages))
        })
        .collect();
    Some(errors)
}

fn violations_member(value: &Value) -> Option<FieldViolations> {
    let Value::Object(fields) = value else {
        if !value.is_null() {
            tracing::debug!(
                member = "violations",
                "ignoring violations member that is not an object"
            );
        }
        return None;
    };

    let violations = fields
        .iter()
        .filter_map(|(field, message)| Some((field.clone(), message.as_str()?.to_owned())))
        .collect();
    Some(violations)
}
