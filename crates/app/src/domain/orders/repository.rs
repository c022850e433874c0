//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, types::Json};
use uuid::Uuid;

use crate::domain::{
    catalog::records::ProductUuid,
    orders::{
        data::NewOrder,
        records::{OrderItemRecord, OrderRecord, OrderStatus, OrderUuid, PaymentStatus},
    },
    pagination::Page,
    users::records::{Address, UserUuid},
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("sql/create_order_item.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LIST_USER_ORDERS_SQL: &str = include_str!("sql/list_user_orders.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("sql/list_order_items.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");

/// Line item row tagged with the order it belongs to.
struct OrderItemRow {
    order_uuid: Uuid,
    item: OrderItemRecord,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert an order and its line items. Status fields take their
    /// `pending` defaults.
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        user: UserUuid,
        total_amount: Decimal,
        data: &NewOrder,
    ) -> Result<OrderRecord, sqlx::Error> {
        let mut created = query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(user.into_uuid())
            .bind(total_amount)
            .bind(Json(&data.shipping_address))
            .bind(data.notes.as_deref())
            .fetch_one(&mut **tx)
            .await?;

        for (position, item) in data.items.iter().enumerate() {
            let position = i32::try_from(position).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
            let quantity =
                i32::try_from(item.quantity).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

            query(CREATE_ORDER_ITEM_SQL)
                .bind(order.into_uuid())
                .bind(position)
                .bind(item.product_uuid.into_uuid())
                .bind(&item.name)
                .bind(item.price)
                .bind(quantity)
                .bind(item.subtotal)
                .execute(&mut **tx)
                .await?;

            created.items.push(OrderItemRecord {
                product_uuid: item.product_uuid,
                name: item.name.clone(),
                price: item.price,
                quantity: item.quantity,
                subtotal: item.subtotal,
            });
        }

        Ok(created)
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Option<OrderRecord>, sqlx::Error> {
        let Some(order) = query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_optional(&mut **tx)
            .await?
        else {
            return Ok(None);
        };

        let mut orders = [order];

        self.attach_items(tx, &mut orders).await?;

        let [order] = orders;

        Ok(Some(order))
    }

    pub(crate) async fn list_user_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        page: Page,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        let mut orders = query_as::<Postgres, OrderRecord>(LIST_USER_ORDERS_SQL)
            .bind(user.into_uuid())
            .bind(page.limit_i64())
            .bind(page.offset_i64())
            .fetch_all(&mut **tx)
            .await?;

        self.attach_items(tx, &mut orders).await?;

        Ok(orders)
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        status: Option<OrderStatus>,
        page: Page,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        let mut orders = query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(status.map(OrderStatus::as_str))
            .bind(page.limit_i64())
            .bind(page.offset_i64())
            .fetch_all(&mut **tx)
            .await?;

        self.attach_items(tx, &mut orders).await?;

        Ok(orders)
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<Option<OrderRecord>, sqlx::Error> {
        let Some(order) = query_as::<Postgres, OrderRecord>(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .fetch_optional(&mut **tx)
            .await?
        else {
            return Ok(None);
        };

        let mut orders = [order];

        self.attach_items(tx, &mut orders).await?;

        let [order] = orders;

        Ok(Some(order))
    }

    /// Load line items for `orders` in a single query, preserving their
    /// submitted order.
    pub(crate) async fn attach_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &mut [OrderRecord],
    ) -> Result<(), sqlx::Error> {
        if orders.is_empty() {
            return Ok(());
        }

        let uuids: Vec<Uuid> = orders.iter().map(|order| order.uuid.into_uuid()).collect();

        let rows = query_as::<Postgres, OrderItemRow>(LIST_ORDER_ITEMS_SQL)
            .bind(&uuids)
            .fetch_all(&mut **tx)
            .await?;

        let mut items: FxHashMap<Uuid, Vec<OrderItemRecord>> = FxHashMap::default();

        for row in rows {
            items.entry(row.order_uuid).or_default().push(row.item);
        }

        for order in orders {
            order.items = items.remove(&order.uuid.into_uuid()).unwrap_or_default();
        }

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status = row
            .try_get::<&str, _>("status")?
            .parse::<OrderStatus>()
            .map_err(|e| e.into_decode_error("status"))?;

        let payment_status = row
            .try_get::<&str, _>("payment_status")?
            .parse::<PaymentStatus>()
            .map_err(|e| e.into_decode_error("payment_status"))?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            items: Vec::new(),
            total_amount: row.try_get("total_amount")?,
            status,
            payment_status,
            shipping_address: row.try_get::<Json<Address>, _>("shipping_address")?.0,
            notes: row.try_get("notes")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity_i32: i32 = row.try_get("quantity")?;

        let quantity = u32::try_from(quantity_i32).map_err(|e| sqlx::Error::ColumnDecode {
            index: "quantity".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            order_uuid: row.try_get("order_uuid")?,
            item: OrderItemRecord {
                product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
                name: row.try_get("name")?,
                price: row.try_get("price")?,
                quantity,
                subtotal: row.try_get("subtotal")?,
            },
        })
    }
}
