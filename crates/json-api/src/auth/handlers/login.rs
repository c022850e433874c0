//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{into_status_error, models::TokenResponse},
    extensions::*,
    state::State,
};

/// Login Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login Handler
///
/// Exchanges an email and password for a bearer token.
#[endpoint(
    tags("auth"),
    summary = "Login",
    responses(
        (status_code = StatusCode::OK, description = "Signed in"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Incorrect email or password"),
        (status_code = StatusCode::BAD_REQUEST, description = "User account is disabled"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "auth.login", skip(json, depot), err)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<TokenResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let session = state
        .app
        .accounts
        .login(&request.email, &request.password)
        .await
        .map_err(into_status_error)?;

    Ok(Json(session.into()))
}
