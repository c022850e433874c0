//! Update Contact Status Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    contacts::{
        into_status_error,
        models::{ContactResponse, ContactStatusRequest, parse_status},
    },
    extensions::*,
    state::State,
};

/// Update Contact Status Handler
#[endpoint(
    tags("contact"),
    summary = "Update Contact Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Message updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::NOT_FOUND, description = "Contact message not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Not enough permissions"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "contacts.update_status", skip(contact, json, depot), err)]
pub(crate) async fn handler(
    contact: PathParam<Uuid>,
    json: JsonBody<ContactStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<ContactResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let status = parse_status(&json.into_inner().status)?;

    let contact = state
        .app
        .contacts
        .update_status(contact.into_inner().into(), status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(contact.into()))
}
