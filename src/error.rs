use crate::value::CoerceError;
use thiserror::Error;

/// Top-level error type returned by binding.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("config '{0}' is required but not found")]
    MissingRequired(String),

    #[error("config '{key}': {source}")]
    Field { key: String, source: CoerceError },
}

impl Error {
    /// The lookup key of the field that failed.
    pub fn key(&self) -> &str {
        match self {
            Self::MissingRequired(key) | Self::Field { key, .. } => key,
        }
    }
}
