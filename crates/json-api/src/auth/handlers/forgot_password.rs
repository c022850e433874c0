//! Forgot Password Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{auth::into_status_error, extensions::*, message::MessageResponse, state::State};

const ACKNOWLEDGEMENT: &str = "If the email exists, a password reset link has been sent";

/// Forgot Password Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ForgotPasswordRequest {
    pub email: String,
}

/// Forgot Password Handler
///
/// Emails a reset link when the address belongs to an account. The response
/// is the same either way.
#[endpoint(
    tags("auth"),
    summary = "Forgot Password",
    responses(
        (status_code = StatusCode::OK, description = "Request acknowledged"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "auth.forgot_password", skip(json, depot), err)]
pub(crate) async fn handler(
    json: JsonBody<ForgotPasswordRequest>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .accounts
        .request_password_reset(&json.into_inner().email)
        .await
        .map_err(into_status_error)?;

    Ok(Json(MessageResponse::new(ACKNOWLEDGEMENT)))
}
