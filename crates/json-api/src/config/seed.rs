//! Seed Config

use clap::Args;

/// Start-up seeding settings.
#[derive(Debug, Args)]
pub struct SeedConfig {
    /// Seed the sample catalog and first admin when missing
    #[arg(long, env = "SEED_ON_START", default_value_t = true, action = clap::ArgAction::Set)]
    pub seed_on_start: bool,

    /// Password for the first admin account; no admin is created when unset
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: Option<String>,
}
