//! Mail Config

use clap::Args;

/// Outbound email settings.
#[derive(Debug, Args)]
pub struct MailConfig {
    /// SMTP relay host
    #[arg(long, env = "SMTP_HOST", default_value = "smtp.gmail.com")]
    pub smtp_host: String,

    /// SMTP relay port
    #[arg(long, env = "SMTP_PORT", default_value_t = 587)]
    pub smtp_port: u16,

    /// SMTP login; email is skipped when unset
    #[arg(long, env = "SMTP_USER")]
    pub smtp_user: Option<String>,

    /// SMTP password
    #[arg(long, env = "SMTP_PASSWORD", hide_env_values = true)]
    pub smtp_password: Option<String>,

    /// Recipient of contact alerts and address of the seeded admin
    #[arg(long, env = "ADMIN_EMAIL", default_value = "admin@poppyandteal.com")]
    pub admin_email: String,

    /// Storefront base URL used in email links
    #[arg(long, env = "FRONTEND_URL", default_value = "http://localhost:3000")]
    pub frontend_url: String,
}
