//! Throwaway Postgres databases for integration tests.
//!
//! One container is started per test binary and every [`TestDb`] creates its
//! own database inside it, with all migrations applied. Databases are dropped
//! in the background once their `TestDb` goes away.

use once_cell::sync::Lazy;
use sqlx::{Connection, PgConnection, PgPool, Postgres, Transaction};
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use tokio::sync::{OnceCell, mpsc};
use uuid::Uuid;

use crate::database;

const DB_USER: &str = "storefront_test";
const DB_PASSWORD: &str = "storefront_test_password";

static POSTGRES_CONTAINER: Lazy<OnceCell<ContainerAsync<PostgresImage>>> = Lazy::new(OnceCell::new);

static DROP_SENDER: Lazy<OnceCell<mpsc::UnboundedSender<String>>> = Lazy::new(OnceCell::new);

async fn start_container() -> ContainerAsync<PostgresImage> {
    PostgresImage::default()
        .with_user(DB_USER)
        .with_password(DB_PASSWORD)
        .with_db_name(DB_USER)
        .with_env_var("POSTGRES_INITDB_ARGS", "--auth-host=trust")
        .start()
        .await
        .expect("Failed to start PostgreSQL container")
}

async fn start_drop_worker() -> mpsc::UnboundedSender<String> {
    let (sender, mut receiver) = mpsc::unbounded_channel::<String>();

    tokio::spawn(async move {
        while let Some(name) = receiver.recv().await {
            if let Err(error) = drop_database(&name).await {
                eprintln!("Failed to drop test database '{name}': {error}");
            }
        }
    });

    sender
}

async fn server_url(database: &str) -> Option<String> {
    let container = POSTGRES_CONTAINER.get()?;
    let port = container.get_host_port_ipv4(5432).await.ok()?;
    let host =
        std::env::var("TESTCONTAINERS_HOST_OVERRIDE").unwrap_or_else(|_| "localhost".to_string());

    Some(format!(
        "postgresql://{DB_USER}:{DB_PASSWORD}@{host}:{port}/{database}"
    ))
}

async fn drop_database(name: &str) -> Result<(), sqlx::Error> {
    let Some(url) = server_url("postgres").await else {
        return Ok(());
    };

    let mut conn = PgConnection::connect(&url).await?;

    sqlx::query(&format!("DROP DATABASE IF EXISTS \"{name}\""))
        .execute(&mut conn)
        .await?;

    conn.close().await
}

/// An isolated, migrated database.
#[derive(Debug, Clone)]
pub struct TestDb {
    pool: PgPool,
    name: String,
}

impl Drop for TestDb {
    fn drop(&mut self) {
        if let Some(sender) = DROP_SENDER.get() {
            let _ = sender.send(self.name.clone());
        }
    }
}

impl TestDb {
    pub async fn new() -> Self {
        DROP_SENDER.get_or_init(start_drop_worker).await;
        POSTGRES_CONTAINER.get_or_init(start_container).await;

        // Generated from a UUID, so safe to interpolate into DDL.
        let name = format!("storefront_test_{}", Uuid::now_v7().simple());

        let admin_url = server_url("postgres")
            .await
            .expect("Failed to resolve container address");

        let mut conn = PgConnection::connect(&admin_url)
            .await
            .expect("Failed to connect to postgres database");

        sqlx::query(&format!("CREATE DATABASE \"{name}\""))
            .execute(&mut conn)
            .await
            .expect("Failed to create test database");

        conn.close()
            .await
            .expect("Failed to close admin connection");

        let url = server_url(&name)
            .await
            .expect("Failed to resolve container address");

        let pool = PgPool::connect(&url)
            .await
            .expect("Failed to create pool for database");

        database::migrate(&pool)
            .await
            .expect("Failed to run migrations on database");

        Self { pool, name }
    }

    /// Begin a transaction that rolls back unless committed.
    pub async fn begin_test_transaction(&self) -> Transaction<'_, Postgres> {
        self.pool
            .begin()
            .await
            .expect("Failed to start test transaction")
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn new_database_has_schema_applied() {
        let test_db = TestDb::new().await;

        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM information_schema.tables \
             WHERE table_schema = 'public' \
               AND table_name IN ('users', 'products', 'orders', 'order_items', 'contacts')",
        )
        .fetch_one(test_db.pool())
        .await
        .expect("Failed to query schema");

        assert_eq!(tables, 5);
    }

    #[tokio::test]
    async fn databases_are_isolated() {
        let first = TestDb::new().await;
        let second = TestDb::new().await;

        sqlx::query("INSERT INTO contacts (uuid, name, email, subject, message) VALUES ($1, 'a', 'a@x.com', 's', 'm')")
            .bind(Uuid::now_v7())
            .execute(first.pool())
            .await
            .expect("Failed to insert contact");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contacts")
            .fetch_one(second.pool())
            .await
            .expect("Failed to count contacts");

        assert_eq!(count, 0);
    }
}
