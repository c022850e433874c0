//! Orders service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::{
    database::Db,
    domain::{
        catalog::{
            records::{ProductRecord, ProductUuid},
            repository::PgProductsRepository,
        },
        orders::{
            data::NewOrder,
            errors::OrdersServiceError,
            records::{OrderRecord, OrderStatus, OrderUuid},
            repository::PgOrdersRepository,
        },
        pagination::{Page, PageBounds},
        users::records::Requester,
    },
    notifications::{Notification, Notifier},
};

/// Paging for a customer's own orders.
pub const USER_ORDERS_PAGE: PageBounds = PageBounds::new(20, 50);

/// Paging for the admin order listing.
pub const ALL_ORDERS_PAGE: PageBounds = PageBounds::new(50, 100);

#[derive(Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
    products: PgProductsRepository,
    notifier: Arc<dyn Notifier>,
}

impl fmt::Debug for PgOrdersService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgOrdersService")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
            products: PgProductsRepository::new(),
            notifier,
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn place_order(
        &self,
        requester: &Requester,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError> {
        order.validate().map_err(OrdersServiceError::InvalidData)?;

        let total_amount = order
            .total_amount()
            .map_err(OrdersServiceError::InvalidData)?;

        let mut product_uuids: Vec<ProductUuid> =
            order.items.iter().map(|item| item.product_uuid).collect();

        product_uuids.sort_unstable();
        product_uuids.dedup();

        let mut tx = self.db.begin().await?;

        // Every row is locked up front in uuid order, so carts naming the same
        // products in different orders cannot deadlock each other.
        let mut products: FxHashMap<ProductUuid, ProductRecord> = self
            .products
            .lock_products(&mut tx, &product_uuids)
            .await?
            .into_iter()
            .map(|product| (product.uuid, product))
            .collect();

        for item in &order.items {
            let product = products
                .get_mut(&item.product_uuid)
                .ok_or(OrdersServiceError::ProductNotFound(item.product_uuid))?;

            if !product.in_stock {
                return Err(OrdersServiceError::OutOfStock {
                    name: product.name.clone(),
                });
            }

            let Some(remaining) = product.stock_quantity.checked_sub(item.quantity) else {
                return Err(OrdersServiceError::InsufficientStock {
                    name: product.name.clone(),
                    available: product.stock_quantity,
                });
            };

            product.stock_quantity = remaining;
            product.in_stock = remaining > 0;
        }

        for uuid in &product_uuids {
            let Some(product) = products.get(uuid) else {
                continue;
            };

            self.products
                .set_stock(&mut tx, product.uuid, product.stock_quantity, product.in_stock)
                .await?;

            debug!(product = %product.uuid, remaining = product.stock_quantity, "reserved stock");
        }

        let created = self
            .repository
            .create_order(&mut tx, OrderUuid::new(), requester.uuid, total_amount, &order)
            .await?;

        tx.commit().await?;

        info!(
            order = %created.uuid,
            user = %requester.uuid,
            total = %created.total_amount,
            "placed order"
        );

        self.notifier.notify(Notification::OrderConfirmation {
            to: requester.email.clone(),
            order: created.clone(),
        });

        Ok(created)
    }

    async fn list_user_orders(
        &self,
        requester: &Requester,
        page: Page,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self
            .repository
            .list_user_orders(&mut tx, requester.uuid, page)
            .await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn get_order(
        &self,
        requester: &Requester,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.repository.get_order(&mut tx, order).await?;

        tx.commit().await?;

        let order = order.ok_or(OrdersServiceError::NotFound)?;

        if order.user_uuid != requester.uuid && !requester.is_admin() {
            return Err(OrdersServiceError::Forbidden);
        }

        Ok(order)
    }

    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self.repository.update_status(&mut tx, order, status).await?;

        tx.commit().await?;

        let updated = updated.ok_or(OrdersServiceError::NotFound)?;

        info!(order = %updated.uuid, status = status.as_str(), "updated order status");

        Ok(updated)
    }

    async fn list_orders(
        &self,
        status: Option<OrderStatus>,
        page: Page,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.repository.list_orders(&mut tx, status, page).await?;

        tx.commit().await?;

        Ok(orders)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Check and decrement stock for every item, then record the order as
    /// `pending`. Either every decrement and the order persist, or none do.
    async fn place_order(
        &self,
        requester: &Requester,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// The requester's own orders, newest first.
    async fn list_user_orders(
        &self,
        requester: &Requester,
        page: Page,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// A single order, visible to its owner and to admins.
    async fn get_order(
        &self,
        requester: &Requester,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Set the fulfilment status.
    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Every order, newest first, optionally filtered by status.
    async fn list_orders(
        &self,
        status: Option<OrderStatus>,
        page: Page,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;
}
