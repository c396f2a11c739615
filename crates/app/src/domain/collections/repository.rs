//! Collections Repository

use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, sqlite::SqliteRow};

use crate::domain::{
    collections::records::{CollectionId, CollectionRecord},
    products::records::ProductId,
};

const GET_COLLECTION_SQL: &str = include_str!("sql/get_collection.sql");
const LIST_COLLECTIONS_SQL: &str = include_str!("sql/list_collections.sql");
const CREATE_COLLECTION_SQL: &str = include_str!("sql/create_collection.sql");
const UPDATE_COLLECTION_SQL: &str = include_str!("sql/update_collection.sql");
const DELETE_COLLECTION_SQL: &str = include_str!("sql/delete_collection.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteCollectionsRepository;

impl SqliteCollectionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_collection(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        collection: CollectionId,
    ) -> Result<CollectionRecord, sqlx::Error> {
        query_as::<Sqlite, CollectionRecord>(GET_COLLECTION_SQL)
            .bind(collection.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_collections(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<Vec<CollectionRecord>, sqlx::Error> {
        query_as::<Sqlite, CollectionRecord>(LIST_COLLECTIONS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_collection(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        title: &str,
        featured_product: Option<ProductId>,
    ) -> Result<CollectionRecord, sqlx::Error> {
        query_as::<Sqlite, CollectionRecord>(CREATE_COLLECTION_SQL)
            .bind(title)
            .bind(featured_product.map(ProductId::into_i64))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_collection(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        collection: CollectionId,
        title: &str,
        featured_product: Option<ProductId>,
    ) -> Result<CollectionRecord, sqlx::Error> {
        query_as::<Sqlite, CollectionRecord>(UPDATE_COLLECTION_SQL)
            .bind(title)
            .bind(featured_product.map(ProductId::into_i64))
            .bind(collection.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_collection(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        collection: CollectionId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_COLLECTION_SQL)
            .bind(collection.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, SqliteRow> for CollectionRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: CollectionId::from_i64(row.try_get("id")?),
            title: row.try_get("title")?,
            featured_product: row
                .try_get::<Option<i64>, _>("featured_product_id")?
                .map(ProductId::from_i64),
        })
    }
}
