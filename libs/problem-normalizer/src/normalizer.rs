use chrono::{DateTime, SecondsFormat, Utc};
use problem_details::ProblemDetail;
use problem_details::accessors::DEFAULT_STATUS;
use problem_details::catalog::{NETWORK_ERROR, UNKNOWN_ERROR};

use crate::caught::CaughtError;
use crate::classify::{Classification, classify};
use crate::config::NormalizerConfig;

/// Detail placed on records whose input was not recognized
pub const UNKNOWN_ERROR_DETAIL: &str = "An unexpected error occurred";

/// Detail placed on records for transport failures
pub const NETWORK_ERROR_DETAIL: &str = "Unable to connect to server. Please check your connection.";

/// Turns caught HTTP client errors into [`ProblemDetail`] records.
///
/// Holds only its configuration, so one instance can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct ProblemNormalizer {
    config: NormalizerConfig,
}

impl ProblemNormalizer {
    #[must_use]
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalize `error`, stamping the record with the current time.
    ///
    /// Never fails: every input yields a record with `type`, `title`,
    /// `status`, `detail`, `timestamp` and `correlationId` set.
    pub fn normalize(&self, error: &CaughtError) -> ProblemDetail {
        self.normalize_at(error, Utc::now())
    }

    /// Same as [`normalize`](Self::normalize) with an explicit timestamp.
    pub fn normalize_at(&self, error: &CaughtError, now: DateTime<Utc>) -> ProblemDetail {
        let classification = classify(error, &self.config);
        let defaults = self.default_record(error, now);

        let problem = match &classification {
            Classification::WellFormedProblem(payload) => {
                defaults.overlay(ProblemDetail::from_json_object(payload))
            }
            Classification::StringBody { status, body } => defaults
                .with_status(status.unwrap_or(DEFAULT_STATUS))
                .with_detail(*body),
            Classification::MessageBody { status, message } => defaults
                .with_status(status.unwrap_or(DEFAULT_STATUS))
                .with_detail(message.clone()),
            Classification::NetworkFailure => defaults.overlay(
                NETWORK_ERROR.as_problem(&self.config.problem_base_uri, NETWORK_ERROR_DETAIL),
            ),
            Classification::Unrecognized => defaults,
        };

        tracing::debug!(
            classification = classification.kind(),
            status = problem.status_or_default(),
            correlation_id = problem.correlation_id.as_deref().unwrap_or_default(),
            "normalized HTTP client error"
        );
        problem
    }

    fn default_record(&self, error: &CaughtError, now: DateTime<Utc>) -> ProblemDetail {
        let correlation_id = error
            .correlation_id()
            .unwrap_or(&self.config.default_correlation_id);

        UNKNOWN_ERROR
            .as_problem(&self.config.problem_base_uri, UNKNOWN_ERROR_DETAIL)
            .with_timestamp(format_timestamp(now))
            .with_correlation_id(correlation_id)
    }
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`.
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
