//! Server configuration module

use clap::Parser;

use storefront_app::{
    auth::SigningSecret, context::AppConfig, notifications::SmtpSettings, seed::AdminSeed,
};

use crate::config::{
    auth::AuthConfig,
    db::DatabaseConfig,
    mail::MailConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    seed::SeedConfig,
    server::ServerRuntimeConfig,
};

pub(crate) mod auth;
pub(crate) mod db;
pub(crate) mod mail;
pub(crate) mod observability;
pub(crate) mod seed;
pub(crate) mod server;

pub(crate) use observability::LogFormat;

/// Storefront JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "storefront-json", about = "Storefront JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Bearer token settings.
    #[command(flatten)]
    pub auth: AuthConfig,

    /// Outbound email settings.
    #[command(flatten)]
    pub mail: MailConfig,

    /// Start-up seeding settings.
    #[command(flatten)]
    pub seed: SeedConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Settings handed to the application context.
    #[must_use]
    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            database_url: self.database.database_url.clone(),
            jwt_secret: SigningSecret::new(self.auth.jwt_secret.as_bytes()),
            smtp: SmtpSettings {
                host: self.mail.smtp_host.clone(),
                port: self.mail.smtp_port,
                username: self.mail.smtp_user.clone(),
                password: self.mail.smtp_password.clone(),
            },
            admin: AdminSeed {
                email: self.mail.admin_email.clone(),
                password: self.seed.admin_password.clone(),
            },
            frontend_url: self.mail.frontend_url.clone(),
            seed: self.seed.seed_on_start,
        }
    }
}
