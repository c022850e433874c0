//! Order Records

use std::str::FromStr;

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::{
        catalog::records::ProductUuid,
        errors::UnknownVariant,
        users::records::{Address, UserUuid},
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Fulfilment state. Any status may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Confirmed,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Statuses whose totals count as revenue.
    pub const REVENUE: [Self; 4] = [
        Self::Confirmed,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    #[must_use]
    pub fn counts_as_revenue(self) -> bool {
        Self::REVENUE.contains(&self)
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownVariant::new("order status", value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
    Refunded,
}

impl PaymentStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "failed" => Ok(Self::Failed),
            "refunded" => Ok(Self::Refunded),
            other => Err(UnknownVariant::new("payment status", other)),
        }
    }
}

/// Line item snapshot taken when the order was placed.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemRecord {
    pub product_uuid: ProductUuid,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    pub subtotal: Decimal,
}

/// Order Record
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub items: Vec<OrderItemRecord>,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub shipping_address: Address,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_its_name() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse(), Ok(status));
        }

        assert!("refunded".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn pending_and_cancelled_are_not_revenue() {
        assert!(!OrderStatus::Pending.counts_as_revenue());
        assert!(!OrderStatus::Cancelled.counts_as_revenue());
        assert!(OrderStatus::Shipped.counts_as_revenue());
    }

    #[test]
    fn payment_status_parses_stored_values() {
        assert_eq!("refunded".parse(), Ok(PaymentStatus::Refunded));
        assert!("shipped".parse::<PaymentStatus>().is_err());
    }
}
