//! Order Models

use std::str::FromStr;

use salvo::{http::StatusError, oapi::ToSchema};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::{
    data::{NewOrder, NewOrderItem},
    records::{OrderItemRecord, OrderRecord, OrderStatus},
};

use crate::{
    auth::models::AddressPayload,
    extensions::{MoneyExt as _, parse_money},
};

/// Order line as sent by the cart and as stored on the order
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemPayload {
    pub product_id: Uuid,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub subtotal: f64,
}

impl From<OrderItemRecord> for OrderItemPayload {
    fn from(item: OrderItemRecord) -> Self {
        Self {
            product_id: item.product_uuid.into_uuid(),
            price: item.price.to_json_number(),
            subtotal: item.subtotal.to_json_number(),
            name: item.name,
            quantity: item.quantity,
        }
    }
}

impl TryFrom<OrderItemPayload> for NewOrderItem {
    type Error = StatusError;

    fn try_from(item: OrderItemPayload) -> Result<Self, Self::Error> {
        Ok(NewOrderItem {
            product_uuid: item.product_id.into(),
            price: parse_money(item.price, "price")?,
            subtotal: parse_money(item.subtotal, "subtotal")?,
            name: item.name,
            quantity: item.quantity,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub id: Uuid,

    /// The customer who placed the order
    pub user_id: Uuid,

    pub items: Vec<OrderItemPayload>,

    /// Sum of the item subtotals
    pub total_amount: f64,

    pub status: String,

    pub payment_status: String,

    pub shipping_address: AddressPayload,

    pub notes: Option<String>,

    /// The date and time the order was placed
    pub created_at: String,

    /// The date and time the order was last updated
    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        OrderResponse {
            id: order.uuid.into_uuid(),
            user_id: order.user_uuid.into_uuid(),
            items: order.items.into_iter().map(Into::into).collect(),
            total_amount: order.total_amount.to_json_number(),
            status: order.status.as_str().to_string(),
            payment_status: order.payment_status.as_str().to_string(),
            shipping_address: order.shipping_address.into(),
            notes: order.notes,
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Create Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    pub items: Vec<OrderItemPayload>,
    pub shipping_address: AddressPayload,
    pub notes: Option<String>,
}

impl TryFrom<CreateOrderRequest> for NewOrder {
    type Error = StatusError;

    fn try_from(request: CreateOrderRequest) -> Result<Self, Self::Error> {
        Ok(NewOrder {
            items: request
                .items
                .into_iter()
                .map(NewOrderItem::try_from)
                .collect::<Result<_, _>>()?,
            shipping_address: request.shipping_address.into(),
            notes: request.notes,
        })
    }
}

/// Order Status Update Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderStatusRequest {
    /// One of `pending`, `confirmed`, `processing`, `shipped`, `delivered`, `cancelled`
    pub status: String,
}

/// Parse a status name from a body or query string.
pub(crate) fn parse_status(value: &str) -> Result<OrderStatus, StatusError> {
    OrderStatus::from_str(value)
        .map_err(|unknown| StatusError::bad_request().brief(unknown.to_string()))
}
