//! Admin dashboard and user management

pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::AdminServiceError;
pub use service::*;
