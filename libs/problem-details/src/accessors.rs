//! Read-only views over a [`ProblemDetail`] for presentation layers.

use std::borrow::Cow;

use crate::problem::{FieldErrors, ProblemDetail};

/// Shown when a problem carries neither a usable `detail` nor a `title`.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred. Please try again.";

/// Status assumed when a problem carries none.
pub const DEFAULT_STATUS: u16 = 500;

#[must_use]
pub fn status_or_default(problem: &ProblemDetail) -> u16 {
    problem.status.unwrap_or(DEFAULT_STATUS)
}

/// Field validation errors in a single shape.
///
/// `errors` is returned as-is when present. Otherwise each `violations`
/// entry becomes a one-element list. With neither, the map is empty.
#[must_use]
pub fn get_validation_errors(problem: &ProblemDetail) -> Cow<'_, FieldErrors> {
    if let Some(errors) = &problem.errors {
        return Cow::Borrowed(errors);
    }

    let Some(violations) = &problem.violations else {
        return Cow::Owned(FieldErrors::new());
    };

    Cow::Owned(
        violations
            .iter()
            .map(|(field, message)| (field.clone(), vec![message.clone()]))
            .collect(),
    )
}

/// Whether the problem's type URI contains `/problems/<type_tag>`.
#[must_use]
pub fn is_problem_type(problem: &ProblemDetail, type_tag: &str) -> bool {
    problem
        .type_url
        .as_deref()
        .is_some_and(|type_url| type_url.contains(&format!("/problems/{type_tag}")))
}

/// User-facing message: `detail`, then `title`, then [`GENERIC_ERROR_MESSAGE`].
///
/// A `detail` that merely repeats the `title` is skipped in favor of the title.
#[must_use]
pub fn get_error_message(problem: &ProblemDetail) -> &str {
    let title = problem.title.as_deref().filter(|t| !t.is_empty());

    if let Some(detail) = problem.detail.as_deref().filter(|d| !d.is_empty())
        && Some(detail) != title
    {
        return detail;
    }

    title.unwrap_or(GENERIC_ERROR_MESSAGE)
}

/// 4xx. A missing status counts as 500.
#[must_use]
pub fn is_client_error(problem: &ProblemDetail) -> bool {
    (400..500).contains(&status_or_default(problem))
}

/// 5xx and above. A missing status counts as 500.
///
/// The network-failure sentinel (status 0) is neither a client nor a server error.
#[must_use]
pub fn is_server_error(problem: &ProblemDetail) -> bool {
    status_or_default(problem) >= 500
}
