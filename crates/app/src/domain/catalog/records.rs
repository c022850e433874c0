//! Product Records

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Free-form product details, stored as JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductMetadata {
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default)]
    pub dimensions: Option<String>,
    #[serde(default)]
    pub care_instructions: Option<String>,
}

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub image: String,
    pub images: Vec<String>,
    pub in_stock: bool,
    pub stock_quantity: u32,
    pub featured: bool,
    pub metadata: Option<ProductMetadata>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
