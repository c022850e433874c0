//! Product Categories Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, products::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoriesResponse {
    /// Distinct categories, sorted
    pub categories: Vec<String>,
}

/// Product Categories Handler
#[endpoint(
    tags("products"),
    summary = "List Categories",
    responses(
        (status_code = StatusCode::OK, description = "Categories"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CategoriesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let categories = state
        .app
        .catalog
        .categories()
        .await
        .map_err(into_status_error)?;

    Ok(Json(CategoriesResponse { categories }))
}
