//! Update Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{
        into_status_error,
        models::{OrderResponse, OrderStatusRequest, parse_status},
    },
    state::State,
};

/// Update Order Status Handler
///
/// Any status may follow any other.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Not enough permissions"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.update_status",
    skip(order, json, depot),
    fields(order_uuid = tracing::field::Empty, status = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<OrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let order = order.into_inner();
    let status = parse_status(&json.into_inner().status)?;

    let span = tracing::Span::current();

    span.record("order_uuid", tracing::field::display(order));
    span.record("status", status.as_str());

    let updated = state
        .app
        .orders
        .update_status(order.into(), status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::orders::{
        MockOrdersService, OrdersServiceError,
        records::{OrderStatus, OrderUuid},
    };

    use crate::test_helpers::{Mocks, TEST_CUSTOMER_UUID, admin_service, make_order};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        admin_service(
            Mocks {
                orders,
                ..Mocks::default()
            },
            Router::with_path("orders/{order}/status").put(handler),
        )
    }

    #[tokio::test]
    async fn test_update_status_success() -> TestResult {
        let uuid = OrderUuid::new();
        let mut order = make_order(uuid, TEST_CUSTOMER_UUID);

        order.status = OrderStatus::Shipped;

        let mut orders = MockOrdersService::new();

        orders
            .expect_update_status()
            .once()
            .withf(move |u, status| *u == uuid && *status == OrderStatus::Shipped)
            .return_once(move |_, _| Ok(order));

        let mut res = TestClient::put(format!("http://example.com/orders/{uuid}/status"))
            .json(&json!({ "status": "shipped" }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(body.status, "shipped");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_status_unknown_value_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_update_status().never();

        let res = TestClient::put(format!("http://example.com/orders/{}/status", OrderUuid::new()))
            .json(&json!({ "status": "lost" }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_status_missing_order_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_update_status()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/orders/{}/status", OrderUuid::new()))
            .json(&json!({ "status": "delivered" }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
