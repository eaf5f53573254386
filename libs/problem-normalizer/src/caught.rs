//! Shape of the errors an HTTP client hands back on failure.
//!
//! Every field is optional: a caught error may be a transport failure with no
//! response, a response with no body, or something else entirely. None of the
//! constructors here can fail.

use bytes::Bytes;
use problem_details::status_from_number;
use serde_json::{Map, Value};

use crate::classify::is_truthy;

/// Header carrying the request-tracing identifier
pub const CORRELATION_ID_HEADER: &str = "X-Correlation-Id";

/// Response half of a caught error
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorResponse {
    /// HTTP status of the response, if known
    pub status: Option<u16>,
    /// Decoded response body
    pub data: Option<Value>,
    /// Value of the `X-Correlation-Id` response header
    pub correlation_id: Option<String>,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(status: u16) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: impl Into<Value>) -> Self {
        self.data = Some(data.into());
        self
    }

    #[must_use]
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Decode a buffered HTTP response.
    ///
    /// An empty body is no payload. A body that parses as JSON becomes that
    /// JSON value; anything else is kept as (lossy UTF-8) text.
    #[must_use]
    pub fn from_http(response: http::Response<Bytes>) -> Self {
        let (parts, body) = response.into_parts();
        let correlation_id = parts
            .headers
            .get(CORRELATION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_owned);

        Self {
            status: Some(parts.status.as_u16()),
            data: decode_body(&body),
            correlation_id,
        }
    }

    fn from_object(object: &Map<String, Value>) -> Self {
        let status = object.get("status").and_then(status_value);
        let data = object.get("data").cloned();
        let correlation_id = object
            .get("headers")
            .and_then(Value::as_object)
            .and_then(|headers| {
                headers
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(CORRELATION_ID_HEADER))
            })
            .and_then(|(_, value)| value.as_str())
            .filter(|v| !v.trim().is_empty())
            .map(|v| v.trim().to_owned());

        Self {
            status,
            data,
            correlation_id,
        }
    }
}

/// An error caught around an HTTP call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaughtError {
    /// Client error code, e.g. `NETWORK_ERROR`
    pub code: Option<String>,
    /// The response, when one was received
    pub response: Option<ErrorResponse>,
}

impl CaughtError {
    /// Transport failure: no response was received.
    #[must_use]
    pub fn network(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            response: None,
        }
    }

    #[must_use]
    pub fn from_response(response: ErrorResponse) -> Self {
        Self {
            code: None,
            response: Some(response),
        }
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Interpret any JSON value shaped like `{ code?, response?: { status?, data?, headers? } }`.
    ///
    /// Values that do not fit (non-objects, `null`, ill-typed members) are
    /// read as absent. A `response` that is present but not an object still
    /// counts as "a response was received".
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };

        let code = object
            .get("code")
            .and_then(Value::as_str)
            .map(str::to_owned);

        let response = match object.get("response") {
            Some(Value::Object(response)) => Some(ErrorResponse::from_object(response)),
            Some(other) if is_truthy(other) => Some(ErrorResponse::default()),
            _ => None,
        };

        Self { code, response }
    }

    /// The response payload, when it is truthy.
    #[must_use]
    pub fn payload(&self) -> Option<&Value> {
        self.response
            .as_ref()?
            .data
            .as_ref()
            .filter(|data| is_truthy(data))
    }

    /// The response status, when it is present and non-zero.
    #[must_use]
    pub fn response_status(&self) -> Option<u16> {
        self.response
            .as_ref()?
            .status
            .filter(|status| *status != 0)
    }

    #[must_use]
    pub fn correlation_id(&self) -> Option<&str> {
        self.response.as_ref()?.correlation_id.as_deref()
    }

    /// No response was received, or the client flagged a transport failure.
    #[must_use]
    pub fn is_transport_failure(&self, network_error_codes: &[String]) -> bool {
        self.response.is_none()
            || self
                .code
                .as_deref()
                .is_some_and(|code| network_error_codes.iter().any(|c| c == code))
    }
}

impl From<ErrorResponse> for CaughtError {
    fn from(response: ErrorResponse) -> Self {
        Self::from_response(response)
    }
}

impl From<http::Response<Bytes>> for CaughtError {
    fn from(response: http::Response<Bytes>) -> Self {
        Self::from_response(ErrorResponse::from_http(response))
    }
}

impl From<&Value> for CaughtError {
    fn from(value: &Value) -> Self {
        Self::from_value(value)
    }
}

fn status_value(value: &Value) -> Option<u16> {
    match value {
        Value::Number(n) => status_from_number(n),
        _ => None,
    }
}

fn decode_body(body: &[u8]) -> Option<Value> {
    if body.is_empty() {
        return None;
    }
    match serde_json::from_slice(body) {
        Ok(value) => Some(value),
        Err(_) => Some(Value::String(String::from_utf8_lossy(body).into_owned())),
    }
}
