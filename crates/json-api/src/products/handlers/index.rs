//! Product Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use storefront_app::domain::catalog::{PRODUCTS_PAGE, data::ProductFilter};

use crate::{
    extensions::*,
    products::{into_status_error, models::ProductResponse},
    state::State,
};

/// Product Index Handler
///
/// Lists products, optionally filtered by category, featured flag and stock.
/// The category `All` matches every product.
#[endpoint(
    tags("products"),
    summary = "List Products",
    responses(
        (status_code = StatusCode::OK, description = "Products"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    category: QueryParam<String, false>,
    featured: QueryParam<bool, false>,
    in_stock: QueryParam<bool, false>,
    skip: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = ProductFilter {
        category: category.into_inner(),
        featured: featured.into_inner(),
        in_stock: in_stock.into_inner(),
    };

    let products = state
        .app
        .catalog
        .list_products(filter, skip.into_page(limit, PRODUCTS_PAGE))
        .await
        .map_err(into_status_error)?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::{
        catalog::{CatalogServiceError, MockCatalogService, records::ProductUuid},
        pagination::Page,
    };

    use crate::test_helpers::{Mocks, make_product, public_service};

    use super::*;

    fn make_service(catalog: MockCatalogService) -> Service {
        public_service(
            Mocks {
                catalog,
                ..Mocks::default()
            },
            Router::with_path("products").get(handler),
        )
    }

    #[tokio::test]
    async fn test_index_uses_default_page_without_filters() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_list_products()
            .once()
            .withf(|filter, page| {
                *filter == ProductFilter::default() && *page == Page { skip: 0, limit: 50 }
            })
            .return_once(|_, _| Ok(vec![]));

        let mut res = TestClient::get("http://example.com/products")
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Vec<ProductResponse> = res.take_json().await?;

        assert!(body.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_index_forwards_filters_and_clamps_limit() -> TestResult {
        let uuid = ProductUuid::new();
        let product = make_product(uuid);

        let mut catalog = MockCatalogService::new();

        catalog
            .expect_list_products()
            .once()
            .withf(|filter, page| {
                *filter
                    == ProductFilter {
                        category: Some("Wall Art".to_string()),
                        featured: Some(true),
                        in_stock: Some(false),
                    }
                    && *page == Page { skip: 10, limit: 100 }
            })
            .return_once(move |_, _| Ok(vec![product]));

        let mut res = TestClient::get(
            "http://example.com/products?category=Wall%20Art&featured=true&in_stock=false&skip=10&limit=500",
        )
        .send(&make_service(catalog))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Vec<ProductResponse> = res.take_json().await?;

        let first = body.first().ok_or("empty listing")?;

        assert_eq!(body.len(), 1);
        assert_eq!(first.id, uuid.into_uuid());
        assert!((first.price - 45.5).abs() < f64::EPSILON);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_error_returns_500() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_list_products()
            .once()
            .return_once(|_, _| Err(CatalogServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com/products")
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
