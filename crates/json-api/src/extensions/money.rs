//! Conversions between JSON numbers and exact money amounts.

use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive as _, ToPrimitive as _},
};
use salvo::prelude::StatusError;

pub(crate) trait MoneyExt {
    /// Amount as a JSON number.
    fn to_json_number(&self) -> f64;
}

impl MoneyExt for Decimal {
    fn to_json_number(&self) -> f64 {
        self.to_f64().unwrap_or_default()
    }
}

/// Parse a JSON number into a two-decimal amount.
pub(crate) fn parse_money(value: f64, field: &'static str) -> Result<Decimal, StatusError> {
    Decimal::from_f64(value)
        .map(|amount| amount.round_dp(2))
        .ok_or_else(|| StatusError::bad_request().brief(format!("Invalid {field}")))
}
