//! Submit Contact Message Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    contacts::{
        into_status_error,
        models::{ContactResponse, CreateContactRequest},
    },
    extensions::*,
    state::State,
};

/// Submit Contact Message Handler
///
/// Stores the message and emails the shop owner.
#[endpoint(
    tags("contact"),
    summary = "Submit Contact Message",
    responses(
        (status_code = StatusCode::CREATED, description = "Message received"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "contacts.create", skip(json, depot, res), err)]
pub(crate) async fn handler(
    json: JsonBody<CreateContactRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ContactResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let contact = state
        .app
        .contacts
        .submit(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(contact.into()))
}
