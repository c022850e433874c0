//! Email templates

use minijinja::{Environment, context};
use serde::Serialize;
use thiserror::Error;

use crate::notifications::{EmailMessage, Notification};

const LAYOUT_TEMPLATE: &str = include_str!("templates/layout.html");
const WELCOME_TEMPLATE: &str = include_str!("templates/welcome.html");
const ORDER_CONFIRMATION_TEMPLATE: &str = include_str!("templates/order_confirmation.html");
const CONTACT_ALERT_TEMPLATE: &str = include_str!("templates/contact_alert.html");
const PASSWORD_RESET_TEMPLATE: &str = include_str!("templates/password_reset.html");

#[derive(Debug, Error)]
#[error("failed to render email template")]
pub struct RenderError(#[from] minijinja::Error);

#[derive(Debug, Serialize)]
struct LineItemView<'a> {
    name: &'a str,
    quantity: u32,
    subtotal: String,
}

/// Turns notifications into subject lines and HTML bodies.
#[derive(Debug)]
pub struct NotificationRenderer {
    env: Environment<'static>,
    admin_email: String,
    frontend_url: String,
}

impl NotificationRenderer {
    /// # Errors
    ///
    /// Returns an error if an embedded template fails to parse.
    pub fn new(
        admin_email: impl Into<String>,
        frontend_url: impl Into<String>,
    ) -> Result<Self, RenderError> {
        let mut env = Environment::new();

        env.add_template("layout.html", LAYOUT_TEMPLATE)?;
        env.add_template("welcome.html", WELCOME_TEMPLATE)?;
        env.add_template("order_confirmation.html", ORDER_CONFIRMATION_TEMPLATE)?;
        env.add_template("contact_alert.html", CONTACT_ALERT_TEMPLATE)?;
        env.add_template("password_reset.html", PASSWORD_RESET_TEMPLATE)?;

        Ok(Self {
            env,
            admin_email: admin_email.into(),
            frontend_url: frontend_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Render a notification into a deliverable message.
    ///
    /// # Errors
    ///
    /// Returns an error if template evaluation fails.
    pub fn render(&self, notification: &Notification) -> Result<EmailMessage, RenderError> {
        match notification {
            Notification::Welcome { to, first_name } => Ok(EmailMessage {
                to: to.clone(),
                subject: "Welcome to Poppy & Teal - Your Macramé Journey Begins!".to_string(),
                html: self.env.get_template("welcome.html")?.render(context! {
                    first_name,
                    frontend_url => &self.frontend_url,
                })?,
            }),
            Notification::OrderConfirmation { to, order } => {
                let items: Vec<LineItemView<'_>> = order
                    .items
                    .iter()
                    .map(|item| LineItemView {
                        name: &item.name,
                        quantity: item.quantity,
                        subtotal: format!("{:.2}", item.subtotal),
                    })
                    .collect();

                Ok(EmailMessage {
                    to: to.clone(),
                    subject: format!("Order Confirmation #{} - Poppy & Teal", order.uuid),
                    html: self
                        .env
                        .get_template("order_confirmation.html")?
                        .render(context! {
                            order_id => order.uuid.to_string(),
                            items,
                            total_amount => format!("{:.2}", order.total_amount),
                            shipping_address => &order.shipping_address,
                        })?,
                })
            }
            Notification::ContactAlert { contact } => Ok(EmailMessage {
                to: self.admin_email.clone(),
                subject: format!("New Contact: {}", contact.subject),
                html: self.env.get_template("contact_alert.html")?.render(context! {
                    name => &contact.name,
                    email => &contact.email,
                    subject => &contact.subject,
                    message => &contact.message,
                    created_at => contact.created_at.to_string(),
                })?,
            }),
            Notification::PasswordReset { to, token } => Ok(EmailMessage {
                to: to.clone(),
                subject: "Password Reset - Poppy & Teal".to_string(),
                html: self
                    .env
                    .get_template("password_reset.html")?
                    .render(context! {
                        reset_url => format!("{}/reset-password?token={token}", self.frontend_url),
                    })?,
            }),
        }
    }
}
