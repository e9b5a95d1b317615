use thiserror::Error;

use super::ScalarKind;

/// Failure to turn raw text into a typed field value.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum CoerceError {
    #[error("can not coerce `{literal}` into {kind}")]
    Invalid { kind: ScalarKind, literal: String },

    #[error("mapping entry `{0}` must be split by \"=\"")]
    MalformedEntry(String),

    #[error("unsupported kind: {0}")]
    UnsupportedKind(String),
}

impl CoerceError {
    pub(crate) fn invalid(kind: ScalarKind, literal: &str) -> Self {
        Self::Invalid {
            kind,
            literal: literal.to_string(),
        }
    }
}
