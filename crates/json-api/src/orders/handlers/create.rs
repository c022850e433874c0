//! Place Order Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use storefront_app::domain::orders::data::NewOrder;

use crate::{
    extensions::*,
    observability::record_order_placed,
    orders::{
        into_status_error,
        models::{CreateOrderRequest, OrderResponse},
    },
    state::State,
};

/// Place Order Handler
///
/// Checks and decrements stock for every line, then records the order as
/// `pending`. Nothing is changed when any line fails.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Out of stock or invalid order"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.create",
    skip(json, depot, res),
    fields(
        user_uuid = tracing::field::Empty,
        order_uuid = tracing::field::Empty,
        items_count = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let requester = depot.requester_or_401()?;
    let order = NewOrder::try_from(json.into_inner())?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(requester.uuid));
    span.record("items_count", order.items.len());

    let order = state
        .app
        .orders
        .place_order(&requester, order)
        .await
        .map_err(into_status_error)?;

    span.record("order_uuid", tracing::field::display(order.uuid));

    record_order_placed();

    res.add_header(LOCATION, format!("/api/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;
    use uuid::Uuid;

    use storefront_app::domain::{
        catalog::records::ProductUuid,
        orders::{MockOrdersService, OrdersServiceError, records::OrderUuid},
    };

    use crate::test_helpers::{Mocks, TEST_CUSTOMER_UUID, customer_service, make_order};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        customer_service(
            Mocks {
                orders,
                ..Mocks::default()
            },
            Router::with_path("orders").post(handler),
        )
    }

    fn body(quantity: u32) -> serde_json::Value {
        json!({
            "items": [{
                "product_id": Uuid::from_u128(10),
                "name": "Spiral Plant Hanger",
                "price": 45.5,
                "quantity": quantity,
                "subtotal": 91.0,
            }],
            "shipping_address": {
                "street": "1 Loom Lane",
                "city": "Bath",
                "state": "Somerset",
                "postal_code": "BA1 1AA",
                "country": "UK",
            },
            "notes": "Gift wrap please",
        })
    }

    #[tokio::test]
    async fn test_place_order_returns_201_with_total() -> TestResult {
        let uuid = OrderUuid::new();
        let order = make_order(uuid, TEST_CUSTOMER_UUID);

        let mut orders = MockOrdersService::new();

        orders
            .expect_place_order()
            .once()
            .withf(|requester, new| {
                let item = new.items.first();

                requester.uuid == TEST_CUSTOMER_UUID
                    && new.items.len() == 1
                    && item.is_some_and(|item| {
                        item.product_uuid == ProductUuid::from_uuid(Uuid::from_u128(10))
                            && item.quantity == 2
                            && item.subtotal == Decimal::new(9100, 2)
                    })
                    && new.notes.as_deref() == Some("Gift wrap please")
            })
            .return_once(move |_, _| Ok(order));

        let mut res = TestClient::post("http://example.com/orders")
            .json(&body(2))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(body.id, uuid.into_uuid());
        assert_eq!(body.status, "pending");
        assert!((body.total_amount - 91.0).abs() < f64::EPSILON);

        Ok(())
    }

    #[tokio::test]
    async fn test_place_order_insufficient_stock_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_place_order().once().return_once(|_, _| {
            Err(OrdersServiceError::InsufficientStock {
                name: "Spiral Plant Hanger".to_string(),
                available: 1,
            })
        });

        let res = TestClient::post("http://example.com/orders")
            .json(&body(2))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_place_order_unknown_product_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_place_order().once().return_once(|_, _| {
            Err(OrdersServiceError::ProductNotFound(ProductUuid::from_uuid(
                Uuid::from_u128(10),
            )))
        });

        let res = TestClient::post("http://example.com/orders")
            .json(&body(1))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
