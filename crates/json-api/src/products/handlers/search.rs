//! Product Search Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};

use storefront_app::domain::{catalog::SEARCH_PAGE, pagination::Page};

use crate::{
    extensions::*,
    products::{into_status_error, models::ProductResponse},
    state::State,
};

/// Product Search Handler
///
/// Case-insensitive substring match over name, description and category.
#[endpoint(
    tags("products"),
    summary = "Search Products",
    responses(
        (status_code = StatusCode::OK, description = "Matching products"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "products.search", skip(query, limit, depot), err)]
pub(crate) async fn handler(
    query: PathParam<String>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let page = Page::bounded(None, limit.into_inner(), SEARCH_PAGE);

    let products = state
        .app
        .catalog
        .search_products(&query.into_inner(), page.limit)
        .await
        .map_err(into_status_error)?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}
