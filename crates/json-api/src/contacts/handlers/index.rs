//! Contact Inbox Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use storefront_app::domain::contacts::CONTACTS_PAGE;

use crate::{
    contacts::{
        into_status_error,
        models::{ContactResponse, parse_status},
    },
    extensions::*,
    state::State,
};

/// Contact Inbox Handler
///
/// Messages newest first, optionally filtered by status.
#[endpoint(
    tags("contact"),
    summary = "List Contact Messages",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Messages"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::FORBIDDEN, description = "Not enough permissions"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    skip: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<ContactResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let status = status.into_inner().as_deref().map(parse_status).transpose()?;

    let contacts = state
        .app
        .contacts
        .list_contacts(status, skip.into_page(limit, CONTACTS_PAGE))
        .await
        .map_err(into_status_error)?;

    Ok(Json(contacts.into_iter().map(Into::into).collect()))
}
