//! Update User Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    admin::into_status_error,
    auth::models::{UpdateUserRequest, UserResponse},
    extensions::*,
    state::State,
};

/// Update User Handler
///
/// Edits another user's names and address.
#[endpoint(
    tags("admin"),
    summary = "Update User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "User updated"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Not enough permissions"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "admin.update_user", skip(user, json, depot), err)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    json: JsonBody<UpdateUserRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let user = state
        .app
        .admin
        .update_user(user.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}
