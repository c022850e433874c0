//! Get Contact Message Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    contacts::{into_status_error, models::ContactResponse},
    extensions::*,
    state::State,
};

/// Get Contact Message Handler
#[endpoint(
    tags("contact"),
    summary = "Get Contact Message",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Message"),
        (status_code = StatusCode::NOT_FOUND, description = "Contact message not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Not enough permissions"),
    ),
)]
pub(crate) async fn handler(
    contact: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ContactResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let contact = state
        .app
        .contacts
        .get_contact(contact.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(contact.into()))
}
