//! Storefront domain services, persistence and email delivery.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod notifications;
pub mod seed;

#[cfg(test)]
mod test;

mod uuids;
