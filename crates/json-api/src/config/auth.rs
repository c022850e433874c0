//! Auth Config

use clap::Args;

/// Bearer token settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Secret used to sign and verify JWTs
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,
}
