//! Reset Password Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{auth::into_status_error, extensions::*, message::MessageResponse, state::State};

/// Reset Password Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ResetPasswordRequest {
    /// Token from the reset email
    pub token: String,
    pub new_password: String,
}

/// Reset Password Handler
#[endpoint(
    tags("auth"),
    summary = "Reset Password",
    responses(
        (status_code = StatusCode::OK, description = "Password reset"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid or expired reset token"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "auth.reset_password", skip(json, depot), err)]
pub(crate) async fn handler(
    json: JsonBody<ResetPasswordRequest>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    state
        .app
        .accounts
        .reset_password(&request.token, &request.new_password)
        .await
        .map_err(into_status_error)?;

    Ok(Json(MessageResponse::new("Password reset successfully")))
}
