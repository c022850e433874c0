//! Outbound notifications

use mockall::automock;

use crate::domain::{contacts::records::ContactRecord, orders::records::OrderRecord};

/// A transactional email waiting to be rendered and delivered.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Welcome { to: String, first_name: String },
    OrderConfirmation { to: String, order: OrderRecord },
    ContactAlert { contact: ContactRecord },
    PasswordReset { to: String, token: String },
}

impl Notification {
    /// Short name used in logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Welcome { .. } => "welcome",
            Self::OrderConfirmation { .. } => "order_confirmation",
            Self::ContactAlert { .. } => "contact_alert",
            Self::PasswordReset { .. } => "password_reset",
        }
    }
}

/// Accepts notifications for delivery after the triggering operation committed.
///
/// Implementations never fail the caller; delivery problems are reported
/// through logs only.
#[automock]
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
