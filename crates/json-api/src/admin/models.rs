//! Dashboard Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::admin::records::{DashboardStats, RecentOrder, TopProduct};

use crate::extensions::MoneyExt as _;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RecentOrderResponse {
    pub id: Uuid,
    pub total_amount: f64,
    pub status: String,
    pub created_at: String,
}

impl From<RecentOrder> for RecentOrderResponse {
    fn from(order: RecentOrder) -> Self {
        Self {
            id: order.uuid.into_uuid(),
            total_amount: order.total_amount.to_json_number(),
            status: order.status.as_str().to_string(),
            created_at: order.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TopProductResponse {
    pub product_id: Uuid,
    pub name: String,
    /// Units sold across every order
    pub total_quantity: u64,
    pub total_revenue: f64,
}

impl From<TopProduct> for TopProductResponse {
    fn from(product: TopProduct) -> Self {
        Self {
            product_id: product.product_uuid.into_uuid(),
            name: product.name,
            total_quantity: product.total_quantity,
            total_revenue: product.total_revenue.to_json_number(),
        }
    }
}

/// Store statistics, computed on request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DashboardResponse {
    pub total_orders: u64,
    /// Revenue from confirmed, processing, shipped and delivered orders
    pub total_revenue: f64,
    pub total_products: u64,
    pub total_users: u64,
    pub recent_orders: Vec<RecentOrderResponse>,
    pub top_products: Vec<TopProductResponse>,
}

impl From<DashboardStats> for DashboardResponse {
    fn from(stats: DashboardStats) -> Self {
        Self {
            total_orders: stats.total_orders,
            total_revenue: stats.total_revenue.to_json_number(),
            total_products: stats.total_products,
            total_users: stats.total_users,
            recent_orders: stats.recent_orders.into_iter().map(Into::into).collect(),
            top_products: stats.top_products.into_iter().map(Into::into).collect(),
        }
    }
}

/// Toggle Status Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ToggleStatusResponse {
    pub message: String,
    /// The account's new state
    pub is_active: bool,
}

impl ToggleStatusResponse {
    pub(crate) fn new(is_active: bool) -> Self {
        let message = if is_active {
            "User activated successfully"
        } else {
            "User deactivated successfully"
        };

        Self {
            message: message.to_string(),
            is_active,
        }
    }
}
