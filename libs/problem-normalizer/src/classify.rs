//! Classification of caught errors, decided before any record is built.

use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::caught::CaughtError;
use crate::config::NormalizerConfig;

/// What a caught error looks like, in the order the checks are made.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification<'a> {
    /// Payload already is a problem document (`type`, `title` or `status` set)
    WellFormedProblem(&'a Map<String, Value>),
    /// Legacy plain-text body
    StringBody {
        status: Option<u16>,
        body: &'a str,
    },
    /// Legacy `{ "message": ... }` body
    MessageBody {
        status: Option<u16>,
        message: Cow<'a, str>,
    },
    /// No response, or the client flagged a transport failure
    NetworkFailure,
    /// Nothing recognizable
    Unrecognized,
}

impl Classification<'_> {
    /// Stable name, used in trace events.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::WellFormedProblem(_) => "well_formed_problem",
            Self::StringBody { .. } => "string_body",
            Self::MessageBody { .. } => "message_body",
            Self::NetworkFailure => "network_failure",
            Self::Unrecognized => "unrecognized",
        }
    }
}

/// Classify `error`. Payload shapes are checked before transport failure.
#[must_use]
pub fn classify<'a>(error: &'a CaughtError, config: &NormalizerConfig) -> Classification<'a> {
    if let Some(found) = error
        .payload()
        .and_then(|payload| classify_payload(payload, error.response_status()))
    {
        return found;
    }

    if error.is_transport_failure(&config.network_error_codes) {
        Classification::NetworkFailure
    } else {
        Classification::Unrecognized
    }
}

fn classify_payload(payload: &Value, status: Option<u16>) -> Option<Classification<'_>> {
    match payload {
        Value::Object(object) if looks_like_problem(object) => {
            Some(Classification::WellFormedProblem(object))
        }
        Value::String(body) => Some(Classification::StringBody {
            status,
            body: body.as_str(),
        }),
        Value::Object(object) => {
            let message = object.get("message").filter(|m| is_truthy(m))?;
            Some(Classification::MessageBody {
                status,
                message: message_text(message),
            })
        }
        _ => None,
    }
}

fn looks_like_problem(object: &Map<String, Value>) -> bool {
    ["type", "title", "status"]
        .iter()
        .any(|key| object.get(*key).is_some_and(is_truthy))
}

fn message_text(message: &Value) -> Cow<'_, str> {
    match message {
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}

/// JSON truthiness as HTTP clients see it: `null`, `false`, `0` and `""` are falsy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
