//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::catalog::records::ProductUuid;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order not found")]
    NotFound,

    #[error("product {0} not found")]
    ProductNotFound(ProductUuid),

    #[error("product {name} is out of stock")]
    OutOfStock { name: String },

    #[error("insufficient stock for {name}. Available: {available}")]
    InsufficientStock { name: String, available: u32 },

    #[error("not authorized to view this order")]
    Forbidden,

    #[error("invalid data: {0}")]
    InvalidData(&'static str),

    #[error("related resource not found")]
    InvalidReference,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::InvalidData("missing required data"),
            Some(ErrorKind::CheckViolation) => Self::InvalidData("constraint violated"),
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
