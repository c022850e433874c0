//! App Context

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::{
    auth::{SigningSecret, TokenIssuer},
    database::{self, Db},
    domain::{
        admin::{AdminService, PgAdminService},
        catalog::{CatalogService, PgCatalogService},
        contacts::{ContactsService, PgContactsService},
        orders::{OrdersService, PgOrdersService},
        users::{AccountsService, PgAccountsService},
    },
    notifications::{
        MailerError, NotificationQueue, NotificationRenderer, NotificationWorker, Notifier,
        RenderError, SmtpMailer, SmtpSettings,
    },
    seed::{self, AdminSeed, SeedError},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply migrations")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("failed to seed database")]
    Seed(#[from] SeedError),

    #[error("invalid SMTP configuration")]
    Mailer(#[from] MailerError),

    #[error("failed to load email templates")]
    Templates(#[from] RenderError),
}

/// Everything needed to assemble the services.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: SigningSecret,
    pub smtp: SmtpSettings,
    pub admin: AdminSeed,
    pub frontend_url: String,
    /// Seed the sample catalog and first admin on start-up.
    pub seed: bool,
}

#[derive(Clone)]
pub struct AppContext {
    pub accounts: Arc<dyn AccountsService>,
    pub catalog: Arc<dyn CatalogService>,
    pub orders: Arc<dyn OrdersService>,
    pub contacts: Arc<dyn ContactsService>,
    pub admin: Arc<dyn AdminService>,
}

impl AppContext {
    /// Connect, migrate, optionally seed, and start the email worker.
    ///
    /// Must be called from within a Tokio runtime. Once the context and every
    /// clone of it have been dropped, [`NotificationWorker::drain`] waits for
    /// emails still in the queue.
    ///
    /// # Errors
    ///
    /// Returns an error when the database is unreachable, a migration or seed
    /// step fails, or the email transport cannot be built.
    pub async fn from_config(
        config: &AppConfig,
    ) -> Result<(Self, NotificationWorker), AppInitError> {
        let pool = database::connect(&config.database_url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool).await?;

        let db = Db::new(pool);

        if config.seed {
            seed::seed(&db, &config.admin).await?;
        }

        let mailer = SmtpMailer::new(&config.smtp)?;

        if !mailer.is_configured() {
            info!("SMTP credentials not configured, emails will be skipped");
        }

        let renderer = NotificationRenderer::new(&config.admin.email, &config.frontend_url)?;
        let (queue, worker) = NotificationQueue::start(renderer, Arc::new(mailer));

        let context = Self::from_parts(db, TokenIssuer::new(&config.jwt_secret), Arc::new(queue));

        Ok((context, worker))
    }

    /// Wire the Postgres services around an existing pool and notifier.
    #[must_use]
    pub fn from_parts(db: Db, tokens: TokenIssuer, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            accounts: Arc::new(PgAccountsService::new(db.clone(), tokens, notifier.clone())),
            catalog: Arc::new(PgCatalogService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone(), notifier.clone())),
            contacts: Arc::new(PgContactsService::new(db.clone(), notifier)),
            admin: Arc::new(PgAdminService::new(db)),
        }
    }
}
