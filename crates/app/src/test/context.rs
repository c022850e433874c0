//! Test context for service-level integration tests.

use std::sync::{Arc, Mutex};

use sqlx::query;

use crate::{
    auth::{SigningSecret, TokenIssuer, hash_password},
    database::Db,
    domain::{
        admin::PgAdminService,
        catalog::PgCatalogService,
        contacts::PgContactsService,
        orders::PgOrdersService,
        users::{
            PgAccountsService,
            data::NewUser,
            records::{Requester, UserRole, UserUuid},
            repository::PgUsersRepository,
        },
    },
    notifications::{Notification, Notifier},
};

use super::db::TestDb;

const TEST_SIGNING_SECRET: &str = "storefront-test-secret";

/// Captures notifications instead of delivering them.
#[derive(Debug, Default)]
pub(crate) struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.sent
            .lock()
            .expect("notification log poisoned")
            .push(notification);
    }
}

pub(crate) struct TestContext {
    pub db: TestDb,
    pub tokens: TokenIssuer,
    pub notifier: Arc<RecordingNotifier>,
    pub accounts: PgAccountsService,
    pub catalog: PgCatalogService,
    pub orders: PgOrdersService,
    pub contacts: PgContactsService,
    pub admin: PgAdminService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        let tokens = TokenIssuer::new(&SigningSecret::new(TEST_SIGNING_SECRET));
        let notifier = Arc::new(RecordingNotifier::default());

        Self {
            accounts: PgAccountsService::new(db.clone(), tokens.clone(), notifier.clone()),
            catalog: PgCatalogService::new(db.clone()),
            orders: PgOrdersService::new(db.clone(), notifier.clone()),
            contacts: PgContactsService::new(db.clone(), notifier.clone()),
            admin: PgAdminService::new(db),
            tokens,
            notifier,
            db: test_db,
        }
    }

    /// Everything enqueued so far, oldest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifier
            .sent
            .lock()
            .expect("notification log poisoned")
            .clone()
    }

    /// Insert an admin directly, bypassing self-service registration.
    pub async fn create_admin(&self, email: &str) -> Requester {
        let mut tx = self.db.begin_test_transaction().await;

        let admin = PgUsersRepository::new()
            .create_user(
                &mut tx,
                &NewUser {
                    uuid: UserUuid::new(),
                    email: email.to_string(),
                    password_hash: hash_password("admin-pw")
                        .await
                        .expect("Failed to hash password"),
                    first_name: "Admin".to_string(),
                    last_name: "User".to_string(),
                    role: UserRole::Admin,
                },
            )
            .await
            .expect("Failed to create admin");

        tx.commit().await.expect("Failed to commit admin");

        Requester::from(&admin)
    }

    pub async fn set_active(&self, user: UserUuid, is_active: bool) {
        query("UPDATE users SET is_active = $2 WHERE uuid = $1")
            .bind(user.into_uuid())
            .bind(is_active)
            .execute(self.db.pool())
            .await
            .expect("Failed to update user");
    }
}
