//! Contact Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::contacts::ContactsServiceError;

pub(crate) fn into_status_error(error: ContactsServiceError) -> StatusError {
    match error {
        ContactsServiceError::NotFound => {
            StatusError::not_found().brief("Contact message not found")
        }
        ContactsServiceError::InvalidData(reason) => StatusError::bad_request().brief(reason),
        ContactsServiceError::Sql(source) => {
            error!("contact storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
