//! Product Models

use salvo::{http::StatusError, oapi::ToSchema};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::catalog::{
    data::{NewProduct, ProductUpdate},
    records::{ProductMetadata, ProductRecord},
};

use crate::extensions::{MoneyExt as _, parse_money};

/// Product details shown on the product page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct MetadataPayload {
    #[serde(default)]
    pub materials: Vec<String>,
    pub dimensions: Option<String>,
    pub care_instructions: Option<String>,
}

impl From<ProductMetadata> for MetadataPayload {
    fn from(metadata: ProductMetadata) -> Self {
        Self {
            materials: metadata.materials,
            dimensions: metadata.dimensions,
            care_instructions: metadata.care_instructions,
        }
    }
}

impl From<MetadataPayload> for ProductMetadata {
    fn from(payload: MetadataPayload) -> Self {
        Self {
            materials: payload.materials,
            dimensions: payload.dimensions,
            care_instructions: payload.care_instructions,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub id: Uuid,

    pub name: String,

    pub description: String,

    /// Unit price
    pub price: f64,

    pub category: String,

    /// Primary image path
    pub image: String,

    pub images: Vec<String>,

    pub in_stock: bool,

    pub stock_quantity: u32,

    pub featured: bool,

    pub metadata: Option<MetadataPayload>,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            id: product.uuid.into_uuid(),
            price: product.price.to_json_number(),
            name: product.name,
            description: product.description,
            category: product.category,
            image: product.image,
            images: product.images,
            in_stock: product.in_stock,
            stock_quantity: product.stock_quantity,
            featured: product.featured,
            metadata: product.metadata.map(Into::into),
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub image: String,
    #[serde(default)]
    pub images: Vec<String>,
    /// Derived from `stock_quantity` when omitted
    pub in_stock: Option<bool>,
    #[serde(default)]
    pub stock_quantity: u32,
    #[serde(default)]
    pub featured: bool,
    pub metadata: Option<MetadataPayload>,
}

impl TryFrom<CreateProductRequest> for NewProduct {
    type Error = StatusError;

    fn try_from(request: CreateProductRequest) -> Result<Self, Self::Error> {
        Ok(NewProduct {
            price: parse_money(request.price, "price")?,
            name: request.name,
            description: request.description,
            category: request.category,
            image: request.image,
            images: request.images,
            in_stock: request.in_stock,
            stock_quantity: request.stock_quantity,
            featured: request.featured,
            metadata: request.metadata.map(Into::into),
        })
    }
}

/// Update Product Request; omitted fields are left unchanged.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub images: Option<Vec<String>>,
    pub in_stock: Option<bool>,
    pub stock_quantity: Option<u32>,
    pub featured: Option<bool>,
    pub metadata: Option<MetadataPayload>,
}

impl TryFrom<UpdateProductRequest> for ProductUpdate {
    type Error = StatusError;

    fn try_from(request: UpdateProductRequest) -> Result<Self, Self::Error> {
        Ok(ProductUpdate {
            price: request
                .price
                .map(|price| parse_money(price, "price"))
                .transpose()?,
            name: request.name,
            description: request.description,
            category: request.category,
            image: request.image,
            images: request.images,
            in_stock: request.in_stock,
            stock_quantity: request.stock_quantity,
            featured: request.featured,
            metadata: request.metadata.map(Into::into),
        })
    }
}
