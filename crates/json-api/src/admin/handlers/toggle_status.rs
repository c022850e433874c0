//! Toggle User Status Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    admin::{into_status_error, models::ToggleStatusResponse},
    extensions::*,
    state::State,
};

/// Toggle User Status Handler
///
/// Activates a disabled account or disables an active one. Admins cannot
/// disable themselves.
#[endpoint(
    tags("admin"),
    summary = "Toggle User Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status toggled"),
        (status_code = StatusCode::BAD_REQUEST, description = "Cannot disable your own account"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Not enough permissions"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "admin.toggle_status",
    skip(user, depot),
    fields(user_uuid = tracing::field::Empty, is_active = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ToggleStatusResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.requester_or_401()?;
    let user = user.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));

    let toggled = state
        .app
        .admin
        .toggle_active(&actor, user.into())
        .await
        .map_err(into_status_error)?;

    span.record("is_active", toggled.is_active);

    Ok(Json(ToggleStatusResponse::new(toggled.is_active)))
}
