//! Transactional email
//!
//! Services enqueue a [`Notification`] once their transaction has committed.
//! A background worker renders it with [`NotificationRenderer`] and hands it to
//! a [`Mailer`]. Failures are logged and dropped.

mod mailer;
mod notification;
mod queue;
mod render;

pub use mailer::*;
pub use notification::*;
pub use queue::*;
pub use render::*;
