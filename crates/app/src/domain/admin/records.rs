//! Dashboard Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::domain::{
    catalog::records::ProductUuid,
    orders::records::{OrderStatus, OrderUuid},
};

/// Orders shown in the dashboard's recent list.
pub const RECENT_ORDERS_LIMIT: u32 = 5;

/// Products shown in the dashboard's best sellers list.
pub const TOP_PRODUCTS_LIMIT: u32 = 5;

/// Point-in-time store statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub total_orders: u64,
    pub total_products: u64,
    pub total_users: u64,
    pub total_revenue: Decimal,
    pub recent_orders: Vec<RecentOrder>,
    pub top_products: Vec<TopProduct>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecentOrder {
    pub uuid: OrderUuid,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub created_at: Timestamp,
}

/// Sales of one product across every order.
#[derive(Debug, Clone, PartialEq)]
pub struct TopProduct {
    pub product_uuid: ProductUuid,
    pub name: String,
    pub total_quantity: u64,
    pub total_revenue: Decimal,
}

/// Totals computed by a single aggregate query.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DashboardTotals {
    pub(crate) total_orders: u64,
    pub(crate) total_products: u64,
    pub(crate) total_users: u64,
    pub(crate) total_revenue: Decimal,
}
