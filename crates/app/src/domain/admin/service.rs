//! Admin service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        admin::{
            errors::AdminServiceError,
            records::{DashboardStats, RECENT_ORDERS_LIMIT, TOP_PRODUCTS_LIMIT},
            repository::PgDashboardRepository,
        },
        pagination::{Page, PageBounds},
        users::{
            data::ProfileUpdate,
            records::{Requester, UserRecord, UserUuid},
            repository::PgUsersRepository,
        },
    },
};

/// Paging for the admin user listing.
pub const USERS_PAGE: PageBounds = PageBounds::new(50, 100);

#[derive(Debug, Clone)]
pub struct PgAdminService {
    db: Db,
    dashboard: PgDashboardRepository,
    users: PgUsersRepository,
}

impl PgAdminService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            dashboard: PgDashboardRepository::new(),
            users: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl AdminService for PgAdminService {
    async fn dashboard(&self) -> Result<DashboardStats, AdminServiceError> {
        let mut tx = self.db.begin().await?;

        let totals = self.dashboard.totals(&mut tx).await?;
        let recent_orders = self
            .dashboard
            .recent_orders(&mut tx, RECENT_ORDERS_LIMIT)
            .await?;
        let top_products = self
            .dashboard
            .top_products(&mut tx, TOP_PRODUCTS_LIMIT)
            .await?;

        tx.commit().await?;

        Ok(DashboardStats {
            total_orders: totals.total_orders,
            total_products: totals.total_products,
            total_users: totals.total_users,
            total_revenue: totals.total_revenue,
            recent_orders,
            top_products,
        })
    }

    async fn list_users(&self, page: Page) -> Result<Vec<UserRecord>, AdminServiceError> {
        let mut tx = self.db.begin().await?;

        let users = self.users.list_users(&mut tx, page).await?;

        tx.commit().await?;

        Ok(users)
    }

    async fn update_user(
        &self,
        user: UserUuid,
        update: ProfileUpdate,
    ) -> Result<UserRecord, AdminServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = if update.is_empty() {
            self.users.find_user(&mut tx, user).await?
        } else {
            Some(self.users.update_profile(&mut tx, user, update).await?)
        };

        tx.commit().await?;

        updated.ok_or(AdminServiceError::NotFound)
    }

    async fn toggle_active(
        &self,
        actor: &Requester,
        user: UserUuid,
    ) -> Result<UserRecord, AdminServiceError> {
        let mut tx = self.db.begin().await?;

        let target = self
            .users
            .find_user(&mut tx, user)
            .await?
            .ok_or(AdminServiceError::NotFound)?;

        if target.uuid == actor.uuid {
            return Err(AdminServiceError::CannotToggleSelf);
        }

        let updated = self
            .users
            .set_active(&mut tx, target.uuid, !target.is_active)
            .await?;

        tx.commit().await?;

        info!(
            user = %updated.uuid,
            actor = %actor.uuid,
            is_active = updated.is_active,
            "toggled user status"
        );

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait AdminService: Send + Sync {
    /// Recompute store statistics from current data.
    async fn dashboard(&self) -> Result<DashboardStats, AdminServiceError>;

    /// Users in creation order.
    async fn list_users(&self, page: Page) -> Result<Vec<UserRecord>, AdminServiceError>;

    /// Apply a partial profile update to any user.
    async fn update_user(
        &self,
        user: UserUuid,
        update: ProfileUpdate,
    ) -> Result<UserRecord, AdminServiceError>;

    /// Flip a user's `is_active` flag. Admins cannot toggle themselves.
    async fn toggle_active(
        &self,
        actor: &Requester,
        user: UserUuid,
    ) -> Result<UserRecord, AdminServiceError>;
}
