//! Storefront Domain Concerns

pub mod admin;
pub mod catalog;
pub mod contacts;
pub mod errors;
pub mod orders;
pub mod pagination;
pub mod users;
