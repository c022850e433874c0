//! Account Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::users::AccountsServiceError;

pub(crate) fn into_status_error(error: AccountsServiceError) -> StatusError {
    match error {
        AccountsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Email already registered")
        }
        AccountsServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Incorrect email or password")
        }
        AccountsServiceError::Inactive => {
            StatusError::bad_request().brief("User account is disabled")
        }
        AccountsServiceError::InvalidToken => {
            StatusError::unauthorized().brief("Could not validate credentials")
        }
        AccountsServiceError::InvalidResetToken => {
            StatusError::bad_request().brief("Invalid or expired reset token")
        }
        AccountsServiceError::NotFound => StatusError::not_found().brief("User not found"),
        AccountsServiceError::InvalidData(reason) => StatusError::bad_request().brief(reason),
        AccountsServiceError::Credentials(source) => {
            error!("credential processing failed: {source}");

            StatusError::internal_server_error()
        }
        AccountsServiceError::Sql(source) => {
            error!("account storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
