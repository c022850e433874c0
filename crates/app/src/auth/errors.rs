//! Credential errors.

use thiserror::Error;

use crate::auth::{PasswordError, TokenError};

#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("password processing error")]
    Password(#[from] PasswordError),

    #[error("token processing error")]
    Token(#[from] TokenError),
}
