//! Get Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{into_status_error, models::OrderResponse},
    state::State,
};

/// Get Order Handler
///
/// Visible to the customer who placed the order and to admins.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order"),
        (status_code = StatusCode::FORBIDDEN, description = "Not authorized to view this order"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let requester = depot.requester_or_401()?;

    let order = state
        .app
        .orders
        .get_order(&requester, order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
