//! Catalog service.

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        catalog::{
            data::{NewProduct, ProductFilter, ProductUpdate, like_pattern},
            errors::CatalogServiceError,
            records::{ProductRecord, ProductUuid},
            repository::PgProductsRepository,
        },
        pagination::{Page, PageBounds},
    },
};

/// Paging for the full product listing.
pub const PRODUCTS_PAGE: PageBounds = PageBounds::new(50, 100);

/// Limit for the featured products strip.
pub const FEATURED_PAGE: PageBounds = PageBounds::new(6, 20);

/// Limit for search results.
pub const SEARCH_PAGE: PageBounds = PageBounds::new(20, 50);

#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

fn check_price(price: Decimal) -> Result<(), CatalogServiceError> {
    if price.is_sign_negative() {
        return Err(CatalogServiceError::InvalidData("price must not be negative"));
    }

    Ok(())
}

#[async_trait]
impl CatalogService for PgCatalogService {
    async fn list_products(
        &self,
        filter: ProductFilter,
        page: Page,
    ) -> Result<Vec<ProductRecord>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self
            .repository
            .list_products(&mut tx, &filter, page)
            .await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn featured_products(&self, limit: u32) -> Result<Vec<ProductRecord>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self
            .repository
            .list_featured_products(&mut tx, limit)
            .await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn categories(&self) -> Result<Vec<String>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let categories = self.repository.list_categories(&mut tx).await?;

        tx.commit().await?;

        Ok(categories)
    }

    async fn search_products(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<ProductRecord>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self
            .repository
            .search_products(&mut tx, &like_pattern(query), limit)
            .await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, CatalogServiceError> {
        check_price(product.price)?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_product(&mut tx, ProductUuid::new(), &product)
            .await?;

        tx.commit().await?;

        info!(product = %created.uuid, "created product");

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, CatalogServiceError> {
        if let Some(price) = update.price {
            check_price(price)?;
        }

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(CatalogServiceError::NotFound);
        }

        tx.commit().await?;

        info!(%product, "deleted product");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// List products matching every supplied filter.
    async fn list_products(
        &self,
        filter: ProductFilter,
        page: Page,
    ) -> Result<Vec<ProductRecord>, CatalogServiceError>;

    /// Featured products that are currently in stock.
    async fn featured_products(&self, limit: u32) -> Result<Vec<ProductRecord>, CatalogServiceError>;

    /// Distinct categories, sorted.
    async fn categories(&self) -> Result<Vec<String>, CatalogServiceError>;

    /// Case-insensitive substring search over name, description and category.
    async fn search_products(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<ProductRecord>, CatalogServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, CatalogServiceError>;

    /// Create a product with a server-generated id.
    async fn create_product(&self, product: NewProduct)
    -> Result<ProductRecord, CatalogServiceError>;

    /// Apply a partial update.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, CatalogServiceError>;

    /// Remove a product. Orders keep their snapshots.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), CatalogServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{
        TestContext,
        helpers::{create_product, new_product},
    };

    use super::*;

    fn page() -> Page {
        Page::bounded(None, None, PRODUCTS_PAGE)
    }

    #[tokio::test]
    async fn create_product_derives_in_stock_from_quantity() -> TestResult {
        let ctx = TestContext::new().await;

        let stocked = create_product(&ctx, "Spiral Plant Hanger", Decimal::new(4500, 2), 3).await?;
        let empty = create_product(&ctx, "Feather Wall Art", Decimal::new(6500, 2), 0).await?;

        assert!(stocked.in_stock);
        assert!(!empty.in_stock);
        assert_eq!(stocked.price, Decimal::new(4500, 2));

        Ok(())
    }

    #[tokio::test]
    async fn create_product_rejects_negative_price() {
        let ctx = TestContext::new().await;

        let result = ctx
            .catalog
            .create_product(new_product("Broken", Decimal::new(-1, 0), 1))
            .await;

        assert!(
            matches!(result, Err(CatalogServiceError::InvalidData(_))),
            "expected InvalidData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn get_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.catalog.get_product(ProductUuid::new()).await;

        assert!(
            matches!(result, Err(CatalogServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_products_combines_filters() -> TestResult {
        let ctx = TestContext::new().await;

        let mut wall = new_product("Bohemian Wall Hanging", Decimal::new(8999, 2), 5);
        wall.category = "Wall Hangings".to_string();
        wall.featured = true;
        let wall = ctx.catalog.create_product(wall).await?;

        let mut sold_out = new_product("Feather Wall Art", Decimal::new(6500, 2), 0);
        sold_out.category = "Wall Hangings".to_string();
        sold_out.featured = true;
        ctx.catalog.create_product(sold_out).await?;

        create_product(&ctx, "Spiral Plant Hanger", Decimal::new(4500, 2), 2).await?;

        let products = ctx
            .catalog
            .list_products(
                ProductFilter {
                    category: Some("Wall Hangings".to_string()),
                    featured: Some(true),
                    in_stock: Some(true),
                },
                page(),
            )
            .await?;

        let uuids: Vec<ProductUuid> = products.iter().map(|p| p.uuid).collect();

        assert_eq!(uuids, vec![wall.uuid]);

        let everything = ctx
            .catalog
            .list_products(
                ProductFilter {
                    category: Some("All".to_string()),
                    ..ProductFilter::default()
                },
                page(),
            )
            .await?;

        assert_eq!(everything.len(), 3);

        Ok(())
    }

    #[tokio::test]
    async fn list_products_respects_page_window() -> TestResult {
        let ctx = TestContext::new().await;

        for name in ["A", "B", "C"] {
            create_product(&ctx, name, Decimal::ONE, 1).await?;
        }

        let products = ctx
            .catalog
            .list_products(ProductFilter::default(), Page { skip: 1, limit: 1 })
            .await?;

        assert_eq!(products.len(), 1);
        assert_eq!(products.first().map(|p| p.name.as_str()), Some("B"));

        Ok(())
    }

    #[tokio::test]
    async fn featured_products_exclude_out_of_stock() -> TestResult {
        let ctx = TestContext::new().await;

        let mut featured = new_product("Macramé Table Runner", Decimal::new(3500, 2), 4);
        featured.featured = true;
        let featured = ctx.catalog.create_product(featured).await?;

        let mut sold_out = new_product("Hanging Planters Set", Decimal::new(7500, 2), 0);
        sold_out.featured = true;
        ctx.catalog.create_product(sold_out).await?;

        let products = ctx.catalog.featured_products(6).await?;

        assert_eq!(products.len(), 1);
        assert_eq!(products.first().map(|p| p.uuid), Some(featured.uuid));

        Ok(())
    }

    #[tokio::test]
    async fn categories_are_distinct_and_sorted() -> TestResult {
        let ctx = TestContext::new().await;

        for (name, category) in [
            ("A", "Wall Hangings"),
            ("B", "Plant Hangers"),
            ("C", "Wall Hangings"),
        ] {
            let mut product = new_product(name, Decimal::ONE, 1);
            product.category = category.to_string();
            ctx.catalog.create_product(product).await?;
        }

        assert_eq!(
            ctx.catalog.categories().await?,
            vec!["Plant Hangers".to_string(), "Wall Hangings".to_string()]
        );

        Ok(())
    }

    #[tokio::test]
    async fn search_matches_literal_substring_case_insensitively() -> TestResult {
        let ctx = TestContext::new().await;

        let hanger = create_product(&ctx, "Spiral Plant Hanger", Decimal::ONE, 1).await?;
        create_product(&ctx, "Table Runner", Decimal::ONE, 1).await?;
        let discounted = create_product(&ctx, "100% cotton cord", Decimal::ONE, 1).await?;

        let plant = ctx.catalog.search_products("PLANT", 20).await?;
        let percent = ctx.catalog.search_products("0%", 20).await?;
        let underscore = ctx.catalog.search_products("_", 20).await?;

        assert_eq!(plant.iter().map(|p| p.uuid).collect::<Vec<_>>(), vec![hanger.uuid]);
        assert_eq!(
            percent.iter().map(|p| p.uuid).collect::<Vec<_>>(),
            vec![discounted.uuid]
        );
        assert!(underscore.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn update_product_applies_only_supplied_fields() -> TestResult {
        let ctx = TestContext::new().await;

        let product = create_product(&ctx, "Spiral Plant Hanger", Decimal::new(4500, 2), 3).await?;

        let updated = ctx
            .catalog
            .update_product(
                product.uuid,
                ProductUpdate {
                    price: Some(Decimal::new(4000, 2)),
                    stock_quantity: Some(0),
                    ..ProductUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.name, product.name);
        assert_eq!(updated.price, Decimal::new(4000, 2));
        assert_eq!(updated.stock_quantity, 0);
        assert!(!updated.in_stock);
        assert!(updated.updated_at >= product.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn update_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .catalog
            .update_product(ProductUuid::new(), ProductUpdate::default())
            .await;

        assert!(
            matches!(result, Err(CatalogServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_product_makes_it_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let product = create_product(&ctx, "Spiral Plant Hanger", Decimal::ONE, 1).await?;

        ctx.catalog.delete_product(product.uuid).await?;

        let result = ctx.catalog.get_product(product.uuid).await;
        let again = ctx.catalog.delete_product(product.uuid).await;

        assert!(
            matches!(result, Err(CatalogServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );
        assert!(
            matches!(again, Err(CatalogServiceError::NotFound)),
            "expected NotFound on second delete, got {again:?}"
        );

        Ok(())
    }
}
