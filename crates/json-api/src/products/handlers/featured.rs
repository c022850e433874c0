//! Featured Products Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use storefront_app::domain::{catalog::FEATURED_PAGE, pagination::Page};

use crate::{
    extensions::*,
    products::{into_status_error, models::ProductResponse},
    state::State,
};

/// Featured Products Handler
///
/// Featured products that are in stock.
#[endpoint(
    tags("products"),
    summary = "Featured Products",
    responses(
        (status_code = StatusCode::OK, description = "Featured products"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let page = Page::bounded(None, limit.into_inner(), FEATURED_PAGE);

    let products = state
        .app
        .catalog
        .featured_products(page.limit)
        .await
        .map_err(into_status_error)?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}
