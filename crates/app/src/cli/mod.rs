use clap::{Parser, Subcommand};

mod migrate;
mod seed;

#[derive(Debug, Parser)]
#[command(name = "storefront-app", about = "Storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate(migrate::MigrateArgs),
    /// Insert the sample catalog and first admin when missing
    Seed(seed::SeedArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Migrate(args) => migrate::run(args).await,
            Commands::Seed(args) => seed::run(args).await,
        }
    }
}
