//! Test Helpers

use rust_decimal::Decimal;

use crate::{
    domain::{
        catalog::{
            CatalogService, CatalogServiceError,
            data::NewProduct,
            records::ProductRecord,
        },
        orders::{
            OrdersService, OrdersServiceError,
            data::{NewOrder, NewOrderItem},
            records::OrderRecord,
        },
        users::{
            AccountsService, AccountsServiceError, Session,
            data::Registration,
            records::{Address, Requester},
        },
    },
    test::TestContext,
};

pub(crate) async fn register(
    ctx: &TestContext,
    email: &str,
    password: &str,
) -> Result<Session, AccountsServiceError> {
    ctx.accounts
        .register(Registration {
            email: email.to_string(),
            password: password.to_string(),
            first_name: "Test".to_string(),
            last_name: "Customer".to_string(),
        })
        .await
}

pub(crate) async fn register_requester(
    ctx: &TestContext,
    email: &str,
) -> Result<Requester, AccountsServiceError> {
    let session = register(ctx, email, "pw1").await?;

    Ok(Requester::from(&session.user))
}

pub(crate) fn new_product(name: &str, price: Decimal, stock_quantity: u32) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        description: "Handmade".to_string(),
        price,
        category: "Decor".to_string(),
        image: "/images/product.jpg".to_string(),
        images: Vec::new(),
        in_stock: None,
        stock_quantity,
        featured: false,
        metadata: None,
    }
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    name: &str,
    price: Decimal,
    stock_quantity: u32,
) -> Result<ProductRecord, CatalogServiceError> {
    ctx.catalog
        .create_product(new_product(name, price, stock_quantity))
        .await
}

/// A cart line for `quantity` units at the product's current price.
pub(crate) fn line(product: &ProductRecord, quantity: u32) -> NewOrderItem {
    NewOrderItem {
        product_uuid: product.uuid,
        name: product.name.clone(),
        price: product.price,
        quantity,
        subtotal: product.price * Decimal::from(quantity),
    }
}

pub(crate) async fn place(
    ctx: &TestContext,
    requester: &Requester,
    items: Vec<NewOrderItem>,
) -> Result<OrderRecord, OrdersServiceError> {
    ctx.orders
        .place_order(
            requester,
            NewOrder {
                items,
                shipping_address: Address {
                    street: "1 Loom Lane".to_string(),
                    city: "Knotville".to_string(),
                    state: "KS".to_string(),
                    postal_code: "12345".to_string(),
                    country: "US".to_string(),
                },
                notes: None,
            },
        )
        .await
}
