//! Admin Repository

use sqlx::{FromRow, QueryBuilder, Row, Sqlite, Transaction, query_as, query_scalar, sqlite::SqliteRow};
use tracing::debug;

use crate::{
    database::{try_get_amount, try_get_timestamp},
    domain::{
        admin::{
            data::CollectionChangeField,
            records::{
                AutocompleteOption, CollectionChangeRow, InventoryStatus, OrderChangeRow,
                ProductChangeRow,
            },
        },
        collections::records::CollectionId,
        customers::records::CustomerField,
        orders::records::OrderId,
        products::{data::ProductQuery, records::ProductId},
        query::{
            OrderBy, Predicate, Query, QueryField,
            compile::{push_order_by, push_query, push_where},
        },
    },
};

const SELECT_PRODUCT_ROWS_SQL: &str = include_str!("sql/select_product_rows.sql");
const SELECT_COLLECTION_ROWS_SQL: &str = include_str!("sql/select_collection_rows.sql");
const SELECT_ORDER_ROWS_SQL: &str = include_str!("sql/select_order_rows.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteAdminRepository;

impl SqliteAdminRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    #[tracing::instrument(
        name = "admin.repository.list_product_rows",
        skip(self, tx, product_query),
        fields(row_count = tracing::field::Empty),
        err
    )]
    pub(crate) async fn list_product_rows(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product_query: &ProductQuery,
    ) -> Result<Vec<ProductChangeRow>, sqlx::Error> {
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_PRODUCT_ROWS_SQL);

        push_query(&mut builder, product_query);

        let rows = builder
            .build_query_as::<ProductChangeRow>()
            .fetch_all(&mut **tx)
            .await?;

        let row_count = rows.len();

        tracing::Span::current().record("row_count", row_count);

        debug!(row_count, "listed product change rows");

        Ok(rows)
    }

    pub(crate) async fn list_collection_rows(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        ordering: &[OrderBy<CollectionChangeField>],
    ) -> Result<Vec<CollectionChangeRow>, sqlx::Error> {
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_COLLECTION_ROWS_SQL);

        push_order_by(&mut builder, ordering);

        builder
            .build_query_as::<CollectionChangeRow>()
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_customers(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        filter: Option<&Predicate<CustomerField>>,
    ) -> Result<u64, sqlx::Error> {
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM customers");

        push_where(&mut builder, filter);

        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(&mut **tx)
            .await?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    pub(crate) async fn count_orders(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&mut **tx)
            .await?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    pub(crate) async fn list_order_rows(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<OrderChangeRow>, sqlx::Error> {
        query_as::<Sqlite, OrderChangeRow>(SELECT_ORDER_ROWS_SQL)
            .bind(i64::from(limit))
            .bind(i64::from(offset))
            .fetch_all(&mut **tx)
            .await
    }

    /// `select` must project an `id` and a `text` column.
    pub(crate) async fn autocomplete<F: QueryField>(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        select: &'static str,
        lookup: &Query<F>,
    ) -> Result<Vec<AutocompleteOption>, sqlx::Error> {
        let mut builder = QueryBuilder::<Sqlite>::new(select);

        push_query(&mut builder, lookup);

        builder
            .build_query_as::<AutocompleteOption>()
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, SqliteRow> for ProductChangeRow {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let inventory: i64 = row.try_get("inventory")?;
        let inventory = u32::try_from(inventory).map_err(|e| sqlx::Error::ColumnDecode {
            index: "inventory".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            id: ProductId::from_i64(row.try_get("id")?),
            title: row.try_get("title")?,
            unit_price: try_get_amount(row, "unit_price")?,
            inventory,
            inventory_status: InventoryStatus::from_inventory(inventory),
            collection_title: row.try_get("collection_title")?,
            featured_product_title: row.try_get("featured_product_title")?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for CollectionChangeRow {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let id = CollectionId::from_i64(row.try_get("id")?);
        let product_count: i64 = row.try_get("product_count")?;

        Ok(Self {
            id,
            title: row.try_get("title")?,
            product_count: u64::try_from(product_count).unwrap_or_default(),
            products_link: Self::products_link(id),
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for OrderChangeRow {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: OrderId::from_i64(row.try_get("id")?),
            placed_at: try_get_timestamp(row, "placed_at")?,
            customer_first_name: row.try_get("customer_first_name")?,
            customer_last_name: row.try_get("customer_last_name")?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for AutocompleteOption {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            text: row.try_get("text")?,
        })
    }
}
