//! Orders Data

use rust_decimal::Decimal;

use crate::domain::{catalog::records::ProductUuid, users::records::Address};

/// Largest amount a `NUMERIC(12, 2)` money column holds.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_0FFF, 0xE8, 0, false, 2);

/// A cart line as submitted at checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub product_uuid: ProductUuid,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    pub subtotal: Decimal,
}

/// Checkout request.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub items: Vec<NewOrderItem>,
    pub shipping_address: Address,
    pub notes: Option<String>,
}

impl NewOrder {
    /// Reject malformed carts before any stock is touched.
    ///
    /// # Errors
    ///
    /// Returns a short description of the first problem found.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.items.is_empty() {
            return Err("order must contain at least one item");
        }

        for item in &self.items {
            if item.quantity == 0 {
                return Err("item quantity must be positive");
            }

            if item.price.is_sign_negative() || item.subtotal.is_sign_negative() {
                return Err("item price and subtotal must not be negative");
            }

            if item.price > MAX_AMOUNT || item.subtotal > MAX_AMOUNT {
                return Err("item price or subtotal is too large");
            }
        }

        self.total_amount().map(|_| ())
    }

    /// Sum of the submitted subtotals.
    ///
    /// # Errors
    ///
    /// Fails when the sum does not fit a money column.
    pub fn total_amount(&self) -> Result<Decimal, &'static str> {
        self.items
            .iter()
            .try_fold(Decimal::ZERO, |total, item| total.checked_add(item.subtotal))
            .filter(|total| *total <= MAX_AMOUNT)
            .ok_or("order total is too large")
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn item(quantity: u32, subtotal: Decimal) -> NewOrderItem {
        NewOrderItem {
            product_uuid: ProductUuid::new(),
            name: "Spiral Plant Hanger".to_string(),
            price: Decimal::new(1000, 2),
            quantity,
            subtotal,
        }
    }

    fn order(items: Vec<NewOrderItem>) -> NewOrder {
        NewOrder {
            items,
            shipping_address: Address::default(),
            notes: None,
        }
    }

    #[test]
    fn total_is_sum_of_submitted_subtotals() -> TestResult {
        let order = order(vec![
            item(2, Decimal::new(2000, 2)),
            item(1, Decimal::new(1999, 2)),
        ]);

        assert_eq!(order.total_amount()?, Decimal::new(3999, 2));

        Ok(())
    }

    #[test]
    fn max_amount_is_the_column_ceiling() {
        assert_eq!(MAX_AMOUNT, Decimal::new(999_999_999_999, 2));
    }

    #[test]
    fn subtotal_above_column_ceiling_is_rejected() {
        let too_large = MAX_AMOUNT + Decimal::new(1, 2);

        assert!(order(vec![item(1, too_large)]).validate().is_err());
    }

    #[test]
    fn price_above_column_ceiling_is_rejected() {
        let mut line = item(1, Decimal::TEN);
        line.price = MAX_AMOUNT + Decimal::ONE;

        assert!(order(vec![line]).validate().is_err());
    }

    #[test]
    fn decimal_overflowing_total_is_rejected_without_panicking() {
        let huge = Decimal::from_i128_with_scale(70_000_000_000_000_000_000_000_000_000, 0);
        let order = order(vec![item(1, huge), item(1, huge)]);

        assert!(order.total_amount().is_err());
        assert!(order.validate().is_err());
    }

    #[test]
    fn total_above_column_ceiling_is_rejected() {
        let order = order(vec![item(1, MAX_AMOUNT), item(1, Decimal::new(1, 2))]);

        assert_eq!(order.total_amount(), Err("order total is too large"));
        assert!(order.validate().is_err());
    }

    #[test]
    fn empty_order_is_rejected() {
        assert!(order(Vec::new()).validate().is_err());
    }

    #[test]
    fn zero_quantity_is_rejected() {
        assert!(order(vec![item(0, Decimal::ZERO)]).validate().is_err());
    }

    #[test]
    fn negative_subtotal_is_rejected() {
        assert!(order(vec![item(1, Decimal::new(-1, 0))]).validate().is_err());
    }

    #[test]
    fn well_formed_order_passes() {
        assert!(order(vec![item(1, Decimal::TEN)]).validate().is_ok());
    }
}
