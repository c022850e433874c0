//! Account Handlers

pub(crate) mod forgot_password;
pub(crate) mod login;
pub(crate) mod me;
pub(crate) mod profile;
pub(crate) mod register;
pub(crate) mod reset_password;
