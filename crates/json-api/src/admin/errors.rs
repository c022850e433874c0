//! Admin Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::admin::AdminServiceError;

pub(crate) fn into_status_error(error: AdminServiceError) -> StatusError {
    match error {
        AdminServiceError::NotFound => StatusError::not_found().brief("User not found"),
        AdminServiceError::CannotToggleSelf => {
            StatusError::bad_request().brief("Cannot disable your own account")
        }
        AdminServiceError::InvalidData(reason) => StatusError::bad_request().brief(reason),
        AdminServiceError::Sql(source) => {
            error!("admin storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
