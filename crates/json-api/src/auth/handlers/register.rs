//! Register Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::users::data::Registration;

use crate::{
    auth::{into_status_error, models::TokenResponse},
    extensions::*,
    state::State,
};

/// Register Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<RegisterRequest> for Registration {
    fn from(request: RegisterRequest) -> Self {
        Registration {
            email: request.email,
            password: request.password,
            first_name: request.first_name,
            last_name: request.last_name,
        }
    }
}

/// Register Handler
///
/// Creates a customer account and signs it in.
#[endpoint(
    tags("auth"),
    summary = "Register",
    responses(
        (status_code = StatusCode::OK, description = "Account created"),
        (status_code = StatusCode::CONFLICT, description = "Email already registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "auth.register", skip(json, depot), err)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
) -> Result<Json<TokenResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let session = state
        .app
        .accounts
        .register(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(session.into()))
}
