//! Cart Items Repository

use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, query_scalar, sqlite::SqliteRow};

use crate::{
    database::try_get_amount,
    domain::{
        carts::records::{CartItemId, CartItemRecord, CartUuid},
        products::records::ProductId,
    },
};

const GET_CART_ITEMS_SQL: &str = include_str!("../sql/get_cart_items.sql");
const GET_CART_ITEM_SQL: &str = include_str!("../sql/get_cart_item.sql");
const UPSERT_CART_ITEM_SQL: &str = include_str!("../sql/upsert_cart_item.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("../sql/delete_cart_item.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteCartItemsRepository;

impl SqliteCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_cart_items(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        cart: CartUuid,
    ) -> Result<Vec<CartItemRecord>, sqlx::Error> {
        query_as::<Sqlite, CartItemRecord>(GET_CART_ITEMS_SQL)
            .bind(cart.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_cart_item(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        cart: CartUuid,
        item: CartItemId,
    ) -> Result<CartItemRecord, sqlx::Error> {
        query_as::<Sqlite, CartItemRecord>(GET_CART_ITEM_SQL)
            .bind(cart.into_uuid())
            .bind(item.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    /// Inserts the product into the cart, or adds to its quantity when already present.
    pub(crate) async fn upsert_cart_item(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        cart: CartUuid,
        product: ProductId,
        quantity: u32,
    ) -> Result<CartItemId, sqlx::Error> {
        let id: i64 = query_scalar(UPSERT_CART_ITEM_SQL)
            .bind(cart.into_uuid())
            .bind(product.into_i64())
            .bind(i64::from(quantity))
            .fetch_one(&mut **tx)
            .await?;

        Ok(CartItemId::from_i64(id))
    }

    pub(crate) async fn delete_cart_item(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        cart: CartUuid,
        item: CartItemId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEM_SQL)
            .bind(item.into_i64())
            .bind(cart.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, SqliteRow> for CartItemRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let quantity: i64 = row.try_get("quantity")?;

        Ok(Self {
            id: CartItemId::from_i64(row.try_get("id")?),
            product: ProductId::from_i64(row.try_get("product_id")?),
            product_title: row.try_get("product_title")?,
            quantity: u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
                index: "quantity".to_string(),
                source: Box::new(e),
            })?,
            unit_price: try_get_amount(row, "unit_price")?,
        })
    }
}
