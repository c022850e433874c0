//! Admin Handlers

pub(crate) mod dashboard;
pub(crate) mod toggle_status;
pub(crate) mod update_user;
pub(crate) mod users;
