//! Accounts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::auth::{CredentialsError, PasswordError, TokenError};

#[derive(Debug, Error)]
pub enum AccountsServiceError {
    #[error("email already registered")]
    AlreadyExists,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("account is inactive")]
    Inactive,

    #[error("invalid or expired token")]
    InvalidToken,

    #[error("invalid or expired reset token")]
    InvalidResetToken,

    #[error("user not found")]
    NotFound,

    #[error("invalid data: {0}")]
    InvalidData(&'static str),

    #[error("credentials error")]
    Credentials(#[from] CredentialsError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AccountsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::NotNullViolation) => Self::InvalidData("missing required data"),
            Some(ErrorKind::CheckViolation) => Self::InvalidData("constraint violated"),
            Some(ErrorKind::ForeignKeyViolation | ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<PasswordError> for AccountsServiceError {
    fn from(error: PasswordError) -> Self {
        Self::Credentials(error.into())
    }
}

impl From<TokenError> for AccountsServiceError {
    fn from(error: TokenError) -> Self {
        Self::Credentials(error.into())
    }
}
