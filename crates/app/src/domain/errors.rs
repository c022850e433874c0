//! Shared domain errors.

use thiserror::Error;

/// A stored or submitted string did not name a known enum variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }

    /// Wrap as a column decode failure for `FromRow` implementations.
    pub(crate) fn into_decode_error(self, column: &str) -> sqlx::Error {
        sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: Box::new(self),
        }
    }
}
