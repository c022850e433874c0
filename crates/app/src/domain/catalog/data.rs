//! Catalog Data

use rust_decimal::Decimal;

use crate::domain::catalog::records::ProductMetadata;

/// Category value that disables category filtering.
pub const ALL_CATEGORIES: &str = "All";

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub image: String,
    pub images: Vec<String>,
    /// Derived from `stock_quantity` when omitted.
    pub in_stock: Option<bool>,
    pub stock_quantity: u32,
    pub featured: bool,
    pub metadata: Option<ProductMetadata>,
}

impl NewProduct {
    /// The `in_stock` value to store.
    #[must_use]
    pub fn effective_in_stock(&self) -> bool {
        self.in_stock.unwrap_or(self.stock_quantity > 0)
    }
}

/// Product Update Data; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub images: Option<Vec<String>>,
    pub in_stock: Option<bool>,
    pub stock_quantity: Option<u32>,
    pub featured: Option<bool>,
    pub metadata: Option<ProductMetadata>,
}

impl ProductUpdate {
    /// The `in_stock` value to store: explicit when given, otherwise re-derived
    /// from a supplied stock quantity.
    #[must_use]
    pub fn effective_in_stock(&self) -> Option<bool> {
        self.in_stock
            .or_else(|| self.stock_quantity.map(|quantity| quantity > 0))
    }
}

/// Listing filters, combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub featured: Option<bool>,
    pub in_stock: Option<bool>,
}

impl ProductFilter {
    /// Category to filter on, treating [`ALL_CATEGORIES`] as no filter.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|category| *category != ALL_CATEGORIES)
    }
}

/// Build an `ILIKE` pattern matching `query` as a literal substring.
#[must_use]
pub fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);

    pattern.push('%');

    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }

        pattern.push(c);
    }

    pattern.push('%');

    pattern
}
