//! All Orders Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use storefront_app::domain::orders::ALL_ORDERS_PAGE;

use crate::{
    extensions::*,
    orders::{
        into_status_error,
        models::{OrderResponse, parse_status},
    },
    state::State,
};

/// All Orders Handler
///
/// Every order, newest first, optionally filtered by status.
#[endpoint(
    tags("orders"),
    summary = "List All Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orders"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::FORBIDDEN, description = "Not enough permissions"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    skip: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<OrderResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let status = status.into_inner().as_deref().map(parse_status).transpose()?;

    let orders = state
        .app
        .orders
        .list_orders(status, skip.into_page(limit, ALL_ORDERS_PAGE))
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}
