//! Normalizer configuration.
//!
//! Values come from three layers, later ones winning:
//! 1. Built-in defaults (`NormalizerConfig::default()`)
//! 2. A YAML file, either its `problem_normalizer` section or its root
//! 3. `PROBLEM_NORMALIZER__*` environment variables

use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use problem_details::DEFAULT_PROBLEM_BASE_URI;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Section name inside a host configuration file
pub const CONFIG_SECTION: &str = "problem_normalizer";

/// Prefix of environment overrides, e.g. `PROBLEM_NORMALIZER__PROBLEM_BASE_URI`
pub const ENV_PREFIX: &str = "PROBLEM_NORMALIZER__";

/// Correlation id used when neither the payload nor the response carries one
pub const DEFAULT_CORRELATION_ID: &str = "unknown";

/// Error code the HTTP client attaches to transport failures
pub const DEFAULT_NETWORK_ERROR_CODE: &str = "NETWORK_ERROR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NormalizerConfig {
    /// Base URI for generated problem types (default: `https://api.shopeazy.com/problems`)
    pub problem_base_uri: String,

    /// Correlation id placed on records that carry none (default: `unknown`)
    pub default_correlation_id: String,

    /// Error codes that mark a transport failure (default: `["NETWORK_ERROR"]`)
    pub network_error_codes: Vec<String>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            problem_base_uri: DEFAULT_PROBLEM_BASE_URI.to_owned(),
            default_correlation_id: DEFAULT_CORRELATION_ID.to_owned(),
            network_error_codes: vec![DEFAULT_NETWORK_ERROR_CODE.to_owned()],
        }
    }
}

impl NormalizerConfig {
    /// Load defaults, then `path` (if any), then environment overrides.
    ///
    /// The file may hold the values under a `problem_normalizer` section or at
    /// its root. Environment overrides follow the same layout as the file.
    ///
    /// # Errors
    /// Returns `ConfigError::Load` if the file is missing or cannot be parsed
    /// and `ConfigError::Invalid` if the merged values fail
    /// [`validate`](Self::validate).
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            if !path.is_file() {
                return Err(figment::Error::from(format!(
                    "config file not found: {}",
                    path.display()
                ))
                .into());
            }
            figment = figment.merge(Yaml::file(path));
        }

        let env = Env::prefixed(ENV_PREFIX).split("__");
        figment = if figment.find_value(CONFIG_SECTION).is_ok() {
            figment.merge(env.map(|key| format!("{CONFIG_SECTION}.{key}").into()))
        } else {
            figment.merge(env)
        };
        Self::from_figment(&figment)
    }

    /// Extract the config from an already assembled figment.
    ///
    /// Reads the `problem_normalizer` section when present, the root otherwise.
    /// Missing keys take their defaults.
    ///
    /// # Errors
    /// Returns `ConfigError` if extraction or validation fails.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = if figment.find_value(CONFIG_SECTION).is_ok() {
            figment.extract_inner(CONFIG_SECTION)?
        } else {
            figment.extract()?
        };

        let config = config.normalized();
        if let Err(err) = config.validate() {
            tracing::warn!(error = %err, "rejecting problem normalizer config");
            return Err(err);
        }

        tracing::info!(
            problem_base_uri = %config.problem_base_uri,
            network_error_codes = ?config.network_error_codes,
            "problem normalizer config loaded"
        );
        Ok(config)
    }

    /// Check the values the normalizer relies on.
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.problem_base_uri.trim();
        if base.is_empty() {
            return Err(invalid("problem_base_uri", "must not be empty"));
        }
        if !base.contains("/problems") {
            return Err(invalid(
                "problem_base_uri",
                "must contain a `/problems` path segment",
            ));
        }
        if self.default_correlation_id.trim().is_empty() {
            return Err(invalid("default_correlation_id", "must not be empty"));
        }
        if self.network_error_codes.iter().any(|c| c.trim().is_empty()) {
            return Err(invalid(
                "network_error_codes",
                "must not contain empty codes",
            ));
        }
        Ok(())
    }

    /// Whether `code` marks a transport failure.
    #[must_use]
    pub fn is_network_error_code(&self, code: &str) -> bool {
        self.network_error_codes.iter().any(|c| c == code)
    }

    #[must_use]
    fn normalized(mut self) -> Self {
        let trimmed = self.problem_base_uri.trim().trim_end_matches('/');
        if trimmed.len() != self.problem_base_uri.len() {
            self.problem_base_uri = trimmed.to_owned();
        }
        self
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_owned(),
    }
}
