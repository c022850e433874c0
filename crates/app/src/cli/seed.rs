use clap::Args;
use storefront_app::{
    database::{self, Db},
    seed::{self, AdminSeed},
};

#[derive(Debug, Args)]
pub(crate) struct SeedArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Email address of the first admin account
    #[arg(long, env = "ADMIN_EMAIL", default_value = "admin@poppyandteal.com")]
    admin_email: String,

    /// Password of the first admin account; the admin is skipped when unset
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    admin_password: Option<String>,
}

pub(crate) async fn run(args: SeedArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::migrate(&pool)
        .await
        .map_err(|error| format!("failed to apply migrations: {error}"))?;

    let report = seed::seed(
        &Db::new(pool),
        &AdminSeed {
            email: args.admin_email,
            password: args.admin_password,
        },
    )
    .await
    .map_err(|error| format!("failed to seed database: {error}"))?;

    println!("products_inserted: {}", report.products_inserted);
    println!("admin_created: {}", report.admin_created);

    Ok(())
}
