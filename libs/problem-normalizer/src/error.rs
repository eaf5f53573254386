use thiserror::Error;

/// Configuration error for the normalizer
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    /// Configuration sources could not be read or deserialized
    #[error("failed to load problem normalizer config: {0}")]
    Load(#[source] Box<figment::Error>),

    /// A value was read but is not usable
    #[error("invalid problem normalizer config: `{field}` {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Load(Box::new(err))
    }
}
