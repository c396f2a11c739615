//! Carts service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        carts::{
            data::{NewCart, NewCartItem},
            errors::CartsServiceError,
            records::{CartItemId, CartItemRecord, CartRecord, CartUuid},
            repositories::{SqliteCartItemsRepository, SqliteCartsRepository},
        },
        products::SqliteProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct SqliteCartsService {
    db: Db,
    carts_repository: SqliteCartsRepository,
    items_repository: SqliteCartItemsRepository,
    products_repository: SqliteProductsRepository,
}

impl SqliteCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: SqliteCartsRepository::new(),
            items_repository: SqliteCartItemsRepository::new(),
            products_repository: SqliteProductsRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for SqliteCartsService {
    async fn get_cart(&self, uuid: CartUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut cart = self.carts_repository.get_cart(&mut tx, uuid).await?;

        let items = self.items_repository.get_cart_items(&mut tx, uuid).await?;

        tx.commit().await?;

        cart.items.extend(items);

        Ok(cart)
    }

    async fn create_cart(&self, cart: NewCart) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .carts_repository
            .create_cart(&mut tx, cart.uuid, Timestamp::now())
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn delete_cart(&self, uuid: CartUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.carts_repository.delete_cart(&mut tx, uuid).await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn add_item(
        &self,
        cart: CartUuid,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError> {
        if item.quantity == 0 {
            return Err(CartsServiceError::InvalidData);
        }

        let mut tx = self.db.begin_transaction().await?;

        self.carts_repository.get_cart(&mut tx, cart).await?;

        self.products_repository
            .get_product(&mut tx, item.product)
            .await?;

        let id = self
            .items_repository
            .upsert_cart_item(&mut tx, cart, item.product, item.quantity)
            .await?;

        let created = self.items_repository.get_cart_item(&mut tx, cart, id).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn remove_item(&self, cart: CartUuid, item: CartItemId) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self
            .items_repository
            .delete_cart_item(&mut tx, cart, item)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve a single cart with its items.
    async fn get_cart(&self, uuid: CartUuid) -> Result<CartRecord, CartsServiceError>;

    /// Creates a new, empty cart.
    async fn create_cart(&self, cart: NewCart) -> Result<CartRecord, CartsServiceError>;

    /// Deletes a cart and its items.
    async fn delete_cart(&self, uuid: CartUuid) -> Result<(), CartsServiceError>;

    /// Add a product to the given cart
    async fn add_item(
        &self,
        cart: CartUuid,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Remove an item from the given cart
    async fn remove_item(&self, cart: CartUuid, item: CartItemId) -> Result<(), CartsServiceError>;
}
