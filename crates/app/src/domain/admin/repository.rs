//! Dashboard Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    admin::records::{DashboardTotals, RecentOrder, TopProduct},
    catalog::records::ProductUuid,
    orders::records::{OrderStatus, OrderUuid},
};

const DASHBOARD_TOTALS_SQL: &str = include_str!("sql/dashboard_totals.sql");
const RECENT_ORDERS_SQL: &str = include_str!("sql/recent_orders.sql");
const TOP_PRODUCTS_SQL: &str = include_str!("sql/top_products.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgDashboardRepository;

impl PgDashboardRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn totals(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<DashboardTotals, sqlx::Error> {
        let revenue_statuses: Vec<&str> = OrderStatus::REVENUE
            .into_iter()
            .map(OrderStatus::as_str)
            .collect();

        query_as::<Postgres, DashboardTotals>(DASHBOARD_TOTALS_SQL)
            .bind(revenue_statuses)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn recent_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        limit: u32,
    ) -> Result<Vec<RecentOrder>, sqlx::Error> {
        query_as::<Postgres, RecentOrder>(RECENT_ORDERS_SQL)
            .bind(i64::from(limit))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn top_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        limit: u32,
    ) -> Result<Vec<TopProduct>, sqlx::Error> {
        query_as::<Postgres, TopProduct>(TOP_PRODUCTS_SQL)
            .bind(i64::from(limit))
            .fetch_all(&mut **tx)
            .await
    }
}

fn count(row: &PgRow, column: &str) -> sqlx::Result<u64> {
    let value: i64 = row.try_get(column)?;

    u64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for DashboardTotals {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            total_orders: count(row, "total_orders")?,
            total_products: count(row, "total_products")?,
            total_users: count(row, "total_users")?,
            total_revenue: row.try_get("total_revenue")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for RecentOrder {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status = row
            .try_get::<&str, _>("status")?
            .parse::<OrderStatus>()
            .map_err(|e| e.into_decode_error("status"))?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            total_amount: row.try_get("total_amount")?,
            status,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for TopProduct {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            name: row.try_get("name")?,
            total_quantity: count(row, "total_quantity")?,
            total_revenue: row.try_get("total_revenue")?,
        })
    }
}
