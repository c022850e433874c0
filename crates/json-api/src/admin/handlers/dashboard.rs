//! Dashboard Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    admin::{into_status_error, models::DashboardResponse},
    extensions::*,
    state::State,
};

/// Dashboard Handler
///
/// Totals, the five most recent orders and the five best sellers by units.
#[endpoint(
    tags("admin"),
    summary = "Dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Store statistics"),
        (status_code = StatusCode::FORBIDDEN, description = "Not enough permissions"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<DashboardResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let stats = state
        .app
        .admin
        .dashboard()
        .await
        .map_err(into_status_error)?;

    Ok(Json(stats.into()))
}
