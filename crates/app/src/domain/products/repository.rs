//! Products Repository

use jiff::Timestamp;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, QueryBuilder, Row, Sqlite, Transaction, query, query_as, sqlite::SqliteRow};
use tracing::debug;

use crate::{
    database::{encode_amount, encode_timestamp, try_get_amount, try_get_timestamp},
    domain::{
        collections::records::CollectionId,
        products::{
            data::ProductQuery,
            records::{
                DiscountedProduct, ProductField, ProductId, ProductRecord, ProductWithCollection,
                PromotionId, PromotionRecord,
            },
        },
        query::{
            Predicate,
            compile::{push_query, push_where},
        },
    },
};

const SELECT_PRODUCTS_SQL: &str = include_str!("sql/select_products.sql");
const SELECT_PRODUCTS_WITH_COLLECTION_SQL: &str =
    include_str!("sql/select_products_with_collection.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const LIST_ORDERED_PRODUCTS_SQL: &str = include_str!("sql/list_ordered_products.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const UPDATE_UNIT_PRICE_SQL: &str = include_str!("sql/update_unit_price.sql");
const SELECT_DISCOUNTED_PRODUCTS_SQL: &str = "SELECT products.id, products.title, \
     products.slug, products.description, products.unit_price, products.inventory, \
     products.last_update, products.collection_id, \
     CAST(ROUND(products.unit_price * (1.0 - ";
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");
const CLEAR_INVENTORY_SQL: &str = include_str!("sql/clear_inventory.sql");
const CREATE_PROMOTION_SQL: &str = include_str!("sql/create_promotion.sql");
const ADD_PROMOTION_SQL: &str = include_str!("sql/add_promotion.sql");
const SELECT_PRODUCT_PROMOTIONS_SQL: &str = include_str!("sql/select_product_promotions.sql");

/// Column values shared by inserts and updates.
pub(crate) struct ProductColumns<'a> {
    pub(crate) title: &'a str,
    pub(crate) slug: Option<&'a str>,
    pub(crate) description: Option<&'a str>,
    pub(crate) unit_price: u64,
    pub(crate) inventory: u32,
    pub(crate) last_update: Timestamp,
    pub(crate) collection: CollectionId,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteProductsRepository;

impl SqliteProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    #[tracing::instrument(
        name = "products.repository.list_products",
        skip(self, tx, product_query),
        fields(product_count = tracing::field::Empty),
        err
    )]
    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product_query: &ProductQuery,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_PRODUCTS_SQL);

        push_query(&mut builder, product_query);

        let products = builder
            .build_query_as::<ProductRecord>()
            .fetch_all(&mut **tx)
            .await?;

        let product_count = products.len();

        tracing::Span::current().record("product_count", product_count);

        debug!(product_count, "listed products");

        Ok(products)
    }

    pub(crate) async fn list_products_with_collection(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product_query: &ProductQuery,
    ) -> Result<Vec<ProductWithCollection>, sqlx::Error> {
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_PRODUCTS_WITH_COLLECTION_SQL);

        push_query(&mut builder, product_query);

        builder
            .build_query_as::<ProductWithCollection>()
            .fetch_all(&mut **tx)
            .await
    }

    /// Each product annotated with its price after taking `discount` off, rounded to the
    /// nearest minor unit.
    pub(crate) async fn list_discounted_products(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product_query: &ProductQuery,
        discount: f64,
    ) -> Result<Vec<DiscountedProduct>, sqlx::Error> {
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_DISCOUNTED_PRODUCTS_SQL);

        builder.push_bind(discount);
        builder.push(")) AS INTEGER) AS discounted_price FROM products");

        push_query(&mut builder, product_query);

        builder
            .build_query_as::<DiscountedProduct>()
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_products(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        filter: Option<&Predicate<ProductField>>,
    ) -> Result<u64, sqlx::Error> {
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM products");

        push_where(&mut builder, filter);

        let count: i64 = builder
            .build_query_scalar::<i64>()
            .fetch_one(&mut **tx)
            .await?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product: ProductId,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Sqlite, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_ordered_products(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Sqlite, ProductRecord>(LIST_ORDERED_PRODUCTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        columns: ProductColumns<'_>,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Sqlite, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(columns.title)
            .bind(columns.slug)
            .bind(columns.description)
            .bind(encode_amount(columns.unit_price, "unit_price")?)
            .bind(i64::from(columns.inventory))
            .bind(encode_timestamp(columns.last_update))
            .bind(columns.collection.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product: ProductId,
        columns: ProductColumns<'_>,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Sqlite, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(columns.title)
            .bind(columns.slug)
            .bind(columns.description)
            .bind(encode_amount(columns.unit_price, "unit_price")?)
            .bind(i64::from(columns.inventory))
            .bind(encode_timestamp(columns.last_update))
            .bind(columns.collection.into_i64())
            .bind(product.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    #[tracing::instrument(
        name = "products.repository.update_unit_price",
        skip(self, tx),
        fields(product_id = product.into_i64()),
        err
    )]
    pub(crate) async fn update_unit_price(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product: ProductId,
        unit_price: u64,
        last_update: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_UNIT_PRICE_SQL)
            .bind(encode_amount(unit_price, "unit_price")?)
            .bind(encode_timestamp(last_update))
            .bind(product.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product: ProductId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    #[tracing::instrument(
        name = "products.repository.clear_inventory",
        skip(self, tx, products),
        fields(
            requested_count = tracing::field::Empty,
            updated_count = tracing::field::Empty
        ),
        err
    )]
    pub(crate) async fn clear_inventory(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        products: &[ProductId],
    ) -> Result<u64, sqlx::Error> {
        tracing::Span::current().record("requested_count", products.len());

        let filter = Predicate::in_(ProductField::Id, products.iter().map(|id| id.into_i64()));

        let mut builder = QueryBuilder::<Sqlite>::new(CLEAR_INVENTORY_SQL);

        push_where(&mut builder, Some(&filter));

        let updated_count = builder.build().execute(&mut **tx).await?.rows_affected();

        tracing::Span::current().record("updated_count", updated_count);

        debug!(updated_count, "cleared inventory");

        Ok(updated_count)
    }

    pub(crate) async fn create_promotion(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        description: &str,
        discount: f64,
    ) -> Result<PromotionRecord, sqlx::Error> {
        query_as::<Sqlite, PromotionRecord>(CREATE_PROMOTION_SQL)
            .bind(description)
            .bind(discount)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn add_promotion(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product: ProductId,
        promotion: PromotionId,
    ) -> Result<(), sqlx::Error> {
        query(ADD_PROMOTION_SQL)
            .bind(product.into_i64())
            .bind(promotion.into_i64())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    #[tracing::instrument(
        name = "products.repository.promotions_for",
        skip(self, tx, products),
        fields(
            product_count = tracing::field::Empty,
            link_count = tracing::field::Empty
        ),
        err
    )]
    pub(crate) async fn promotions_for(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        products: &[ProductId],
    ) -> Result<FxHashMap<ProductId, Vec<PromotionRecord>>, sqlx::Error> {
        tracing::Span::current().record("product_count", products.len());

        let mut promotions: FxHashMap<ProductId, Vec<PromotionRecord>> = products
            .iter()
            .map(|product| (*product, Vec::new()))
            .collect();

        if products.is_empty() {
            return Ok(promotions);
        }

        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_PRODUCT_PROMOTIONS_SQL);

        builder.push(" WHERE product_promotions.product_id IN (");

        let mut ids = builder.separated(", ");

        for product in products {
            ids.push_bind(product.into_i64());
        }

        ids.push_unseparated(") ORDER BY promotions.id ASC");

        let rows = builder.build().fetch_all(&mut **tx).await?;

        let link_count = rows.len();

        for row in rows {
            let product = ProductId::from_i64(row.try_get("product_id")?);

            promotions
                .entry(product)
                .or_default()
                .push(PromotionRecord::from_row(&row)?);
        }

        tracing::Span::current().record("link_count", link_count);

        debug!(link_count, "loaded product promotions");

        Ok(promotions)
    }
}

impl<'r> FromRow<'r, SqliteRow> for ProductRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let inventory: i64 = row.try_get("inventory")?;

        Ok(Self {
            id: ProductId::from_i64(row.try_get("id")?),
            title: row.try_get("title")?,
            slug: row.try_get("slug")?,
            description: row.try_get("description")?,
            unit_price: try_get_amount(row, "unit_price")?,
            inventory: u32::try_from(inventory).map_err(|e| sqlx::Error::ColumnDecode {
                index: "inventory".to_string(),
                source: Box::new(e),
            })?,
            last_update: try_get_timestamp(row, "last_update")?,
            collection: CollectionId::from_i64(row.try_get("collection_id")?),
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for ProductWithCollection {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            product: ProductRecord::from_row(row)?,
            collection_title: row.try_get("collection_title")?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for DiscountedProduct {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            product: ProductRecord::from_row(row)?,
            discounted_price: try_get_amount(row, "discounted_price")?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for PromotionRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: PromotionId::from_i64(row.try_get("id")?),
            description: row.try_get("description")?,
            discount: row.try_get("discount")?,
        })
    }
}
