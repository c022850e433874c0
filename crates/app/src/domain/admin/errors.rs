//! Admin service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdminServiceError {
    #[error("user not found")]
    NotFound,

    #[error("cannot disable your own account")]
    CannotToggleSelf,

    #[error("invalid data: {0}")]
    InvalidData(&'static str),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AdminServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::NotNullViolation) => Self::InvalidData("missing required data"),
            Some(ErrorKind::CheckViolation) => Self::InvalidData("constraint violated"),
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
