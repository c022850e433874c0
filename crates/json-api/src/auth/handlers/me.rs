//! Current User Handler

use salvo::prelude::*;

use crate::{auth::models::UserResponse, extensions::*};

/// Current User Handler
///
/// Returns the signed-in user's profile.
#[endpoint(
    tags("auth"),
    summary = "Current User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Current user"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UserResponse>, StatusError> {
    let user = depot.current_user_or_401()?;

    Ok(Json(user.into()))
}
