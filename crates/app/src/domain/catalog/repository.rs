//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar,
    types::Json,
};
use uuid::Uuid;

use crate::domain::{
    catalog::{
        data::{NewProduct, ProductFilter, ProductUpdate},
        records::{ProductMetadata, ProductRecord, ProductUuid},
    },
    pagination::Page,
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const LIST_FEATURED_PRODUCTS_SQL: &str = include_str!("sql/list_featured_products.sql");
const LIST_CATEGORIES_SQL: &str = include_str!("sql/list_categories.sql");
const SEARCH_PRODUCTS_SQL: &str = include_str!("sql/search_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const LOCK_PRODUCTS_SQL: &str = include_str!("sql/lock_products.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const SET_PRODUCT_STOCK_SQL: &str = include_str!("sql/set_product_stock.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &ProductFilter,
        page: Page,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .bind(filter.category())
            .bind(filter.featured)
            .bind(filter.in_stock)
            .bind(page.limit_i64())
            .bind(page.offset_i64())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_featured_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        limit: u32,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_FEATURED_PRODUCTS_SQL)
            .bind(i64::from(limit))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<String>, sqlx::Error> {
        query_scalar(LIST_CATEGORIES_SQL).fetch_all(&mut **tx).await
    }

    pub(crate) async fn search_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        pattern: &str,
        limit: u32,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(SEARCH_PRODUCTS_SQL)
            .bind(pattern)
            .bind(i64::from(limit))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch a product and hold its row lock until the transaction ends.
    /// Lock the given products for update, in `uuid` order so that
    /// concurrent callers always acquire row locks in the same sequence.
    /// Unknown uuids are absent from the result.
    pub(crate) async fn lock_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[ProductUuid],
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        let uuids: Vec<Uuid> = products.iter().map(|product| product.into_uuid()).collect();

        query_as::<Postgres, ProductRecord>(LOCK_PRODUCTS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        data: &NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(&data.name)
            .bind(&data.description)
            .bind(data.price)
            .bind(&data.category)
            .bind(&data.image)
            .bind(&data.images)
            .bind(data.effective_in_stock())
            .bind(stock_to_i32(data.stock_quantity)?)
            .bind(data.featured)
            .bind(data.metadata.clone().map(Json))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, sqlx::Error> {
        let in_stock = update.effective_in_stock();
        let stock_quantity = update.stock_quantity.map(stock_to_i32).transpose()?;

        query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(update.name)
            .bind(update.description)
            .bind(update.price)
            .bind(update.category)
            .bind(update.image)
            .bind(update.images)
            .bind(in_stock)
            .bind(stock_quantity)
            .bind(update.featured)
            .bind(update.metadata.map(Json))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        stock_quantity: u32,
        in_stock: bool,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SET_PRODUCT_STOCK_SQL)
            .bind(product.into_uuid())
            .bind(stock_to_i32(stock_quantity)?)
            .bind(in_stock)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn count_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<i64, sqlx::Error> {
        query_scalar(COUNT_PRODUCTS_SQL).fetch_one(&mut **tx).await
    }
}

fn stock_to_i32(stock_quantity: u32) -> Result<i32, sqlx::Error> {
    i32::try_from(stock_quantity).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let stock_i32: i32 = row.try_get("stock_quantity")?;

        let stock_quantity = u32::try_from(stock_i32).map_err(|e| sqlx::Error::ColumnDecode {
            index: "stock_quantity".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: row.try_get("price")?,
            category: row.try_get("category")?,
            image: row.try_get("image")?,
            images: row.try_get("images")?,
            in_stock: row.try_get("in_stock")?,
            stock_quantity,
            featured: row.try_get("featured")?,
            metadata: row
                .try_get::<Option<Json<ProductMetadata>>, _>("metadata")?
                .map(|metadata| metadata.0),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
