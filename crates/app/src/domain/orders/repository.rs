//! Orders Repository

use jiff::Timestamp;
use sqlx::{
    FromRow, QueryBuilder, Row, Sqlite, Transaction, query, query_as, query_scalar,
    sqlite::SqliteRow,
};
use tracing::debug;

use crate::{
    database::{
        AmountOverflow, encode_amount, encode_timestamp, try_get_amount, try_get_timestamp,
    },
    domain::{
        customers::records::CustomerId,
        orders::records::{OrderId, OrderItemId, OrderItemRecord, OrderLine, OrderRecord},
        products::records::ProductId,
    },
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LIST_RECENT_ORDERS_SQL: &str = include_str!("sql/list_recent_orders.sql");
const DELETE_ORDER_SQL: &str = include_str!("sql/delete_order.sql");
const GET_PRODUCT_PRICE_SQL: &str = include_str!("sql/get_product_price.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("sql/create_order_item.sql");
const SELECT_ORDER_LINES_SQL: &str = include_str!("sql/select_order_lines.sql");
const ORDER_TOTAL_SQL: &str = include_str!("sql/order_total.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteOrdersRepository;

impl SqliteOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    #[tracing::instrument(
        name = "orders.repository.create_order",
        skip(self, tx),
        fields(order_id = tracing::field::Empty),
        err
    )]
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        customer: CustomerId,
        placed_at: Timestamp,
    ) -> Result<OrderRecord, sqlx::Error> {
        let order = query_as::<Sqlite, OrderRecord>(CREATE_ORDER_SQL)
            .bind(encode_timestamp(placed_at))
            .bind(customer.into_i64())
            .fetch_one(&mut **tx)
            .await?;

        tracing::Span::current().record("order_id", order.id.into_i64());

        debug!(order_id = order.id.into_i64(), "inserted order");

        Ok(order)
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        order: OrderId,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Sqlite, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_recent_orders(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        limit: u32,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Sqlite, OrderRecord>(LIST_RECENT_ORDERS_SQL)
            .bind(i64::from(limit))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn delete_order(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        order: OrderId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ORDER_SQL)
            .bind(order.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Current catalog price of a product, if the product exists.
    pub(crate) async fn get_product_price(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product: ProductId,
    ) -> Result<Option<u64>, sqlx::Error> {
        let price: Option<i64> = query_scalar(GET_PRODUCT_PRICE_SQL)
            .bind(product.into_i64())
            .fetch_optional(&mut **tx)
            .await?;

        price
            .map(|price| {
                u64::try_from(price).map_err(|e| sqlx::Error::ColumnDecode {
                    index: "unit_price".to_string(),
                    source: Box::new(e),
                })
            })
            .transpose()
    }

    #[tracing::instrument(
        name = "orders.repository.create_order_item",
        skip(self, tx),
        err
    )]
    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        order: OrderId,
        product: ProductId,
        quantity: u32,
        unit_price: u64,
    ) -> Result<OrderItemRecord, sqlx::Error> {
        query_as::<Sqlite, OrderItemRecord>(CREATE_ORDER_ITEM_SQL)
            .bind(order.into_i64())
            .bind(product.into_i64())
            .bind(i64::from(quantity))
            .bind(encode_amount(unit_price, "unit_price")?)
            .fetch_one(&mut **tx)
            .await
    }

    /// Items of the given orders with their product titles, grouped by order.
    pub(crate) async fn list_order_lines(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        orders: &[OrderId],
    ) -> Result<Vec<OrderLine>, sqlx::Error> {
        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_ORDER_LINES_SQL);

        builder.push(" WHERE order_items.order_id IN (");

        let mut ids = builder.separated(", ");

        for order in orders {
            ids.push_bind(order.into_i64());
        }

        ids.push_unseparated(") ORDER BY order_items.order_id ASC, order_items.id ASC");

        builder
            .build_query_as::<OrderLine>()
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn order_total(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        order: OrderId,
    ) -> Result<u64, sqlx::Error> {
        let lines = query_as::<Sqlite, (i64, i64)>(ORDER_TOTAL_SQL)
            .bind(order.into_i64())
            .fetch_all(&mut **tx)
            .await?;

        let total = lines
            .into_iter()
            .try_fold(0_i64, |total, (quantity, unit_price)| {
                total.checked_add(quantity.checked_mul(unit_price)?)
            })
            .and_then(|total| u64::try_from(total).ok())
            .ok_or(AmountOverflow)?;

        debug!(total, "computed order total");

        Ok(total)
    }
}

impl<'r> FromRow<'r, SqliteRow> for OrderRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: OrderId::from_i64(row.try_get("id")?),
            placed_at: try_get_timestamp(row, "placed_at")?,
            customer: CustomerId::from_i64(row.try_get("customer_id")?),
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for OrderItemRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let quantity: i64 = row.try_get("quantity")?;

        Ok(Self {
            id: OrderItemId::from_i64(row.try_get("id")?),
            order: OrderId::from_i64(row.try_get("order_id")?),
            product: ProductId::from_i64(row.try_get("product_id")?),
            quantity: u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
                index: "quantity".to_string(),
                source: Box::new(e),
            })?,
            unit_price: try_get_amount(row, "unit_price")?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for OrderLine {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            item: OrderItemRecord::from_row(row)?,
            product_title: row.try_get("product_title")?,
        })
    }
}
