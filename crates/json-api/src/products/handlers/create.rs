//! Create Product Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use storefront_app::domain::catalog::data::NewProduct;

use crate::{
    extensions::*,
    products::{
        into_status_error,
        models::{CreateProductRequest, ProductResponse},
    },
    state::State,
};

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Not enough permissions"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.create",
    skip(json, depot, res),
    fields(product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = NewProduct::try_from(json.into_inner())?;

    let product = state
        .app
        .catalog
        .create_product(product)
        .await
        .map_err(into_status_error)?;

    tracing::Span::current().record("product_uuid", tracing::field::display(product.uuid));

    res.add_header(LOCATION, format!("/api/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(product.into()))
}
