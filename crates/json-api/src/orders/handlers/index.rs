//! My Orders Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use storefront_app::domain::orders::USER_ORDERS_PAGE;

use crate::{
    extensions::*,
    orders::{into_status_error, models::OrderResponse},
    state::State,
};

/// My Orders Handler
///
/// The signed-in customer's orders, newest first.
#[endpoint(
    tags("orders"),
    summary = "List My Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orders"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    skip: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<OrderResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let requester = depot.requester_or_401()?;

    let orders = state
        .app
        .orders
        .list_user_orders(&requester, skip.into_page(limit, USER_ORDERS_PAGE))
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}
