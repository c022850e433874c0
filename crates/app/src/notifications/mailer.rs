//! SMTP delivery

use std::fmt;

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use mockall::automock;
use thiserror::Error;

/// A fully rendered email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("SMTP credentials not configured")]
    NotConfigured,

    #[error("invalid email address")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP transport error")]
    Transport(#[from] lettre::transport::smtp::Error),
}

#[automock]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver a single message.
    async fn send(&self, message: EmailMessage) -> Result<(), MailerError>;
}

/// SMTP relay settings.
#[derive(Clone, Default)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "**redacted**"))
            .finish()
    }
}

struct Relay {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

/// Delivers mail through a STARTTLS relay, sending from the login address.
pub struct SmtpMailer {
    relay: Option<Relay>,
}

impl fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("configured", &self.relay.is_some())
            .finish()
    }
}

impl SmtpMailer {
    /// Build a mailer. Without a username and password every send reports
    /// [`MailerError::NotConfigured`].
    ///
    /// # Errors
    ///
    /// Returns an error when the relay host or sender address is invalid.
    pub fn new(settings: &SmtpSettings) -> Result<Self, MailerError> {
        let (Some(username), Some(password)) = (
            settings.username.as_deref().filter(|u| !u.is_empty()),
            settings.password.as_deref().filter(|p| !p.is_empty()),
        ) else {
            return Ok(Self { relay: None });
        };

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
            .port(settings.port)
            .credentials(Credentials::new(username.to_owned(), password.to_owned()))
            .build();

        Ok(Self {
            relay: Some(Relay {
                transport,
                from: username.parse()?,
            }),
        })
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.relay.is_some()
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), MailerError> {
        let Some(relay) = &self.relay else {
            return Err(MailerError::NotConfigured);
        };

        let email = Message::builder()
            .from(relay.from.clone())
            .to(message.to.parse()?)
            .subject(message.subject)
            .header(ContentType::TEXT_HTML)
            .body(message.html)?;

        relay.transport.send(email).await?;

        Ok(())
    }
}
