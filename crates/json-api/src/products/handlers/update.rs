//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use storefront_app::domain::catalog::data::ProductUpdate;

use crate::{
    extensions::*,
    products::{
        into_status_error,
        models::{ProductResponse, UpdateProductRequest},
    },
    state::State,
};

/// Product Update Handler
///
/// Applies a partial update. Setting `stock_quantity` without `in_stock`
/// re-derives availability from the new quantity.
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Not enough permissions"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.update",
    skip(product, json, depot),
    fields(product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = product.into_inner();

    tracing::Span::current().record("product_uuid", tracing::field::display(product));

    let update = ProductUpdate::try_from(json.into_inner())?;

    let updated = state
        .app
        .catalog
        .update_product(product.into(), update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}
