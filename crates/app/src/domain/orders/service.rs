//! Orders service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rustc_hash::FxHashMap;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        customers::{
            SqliteCustomersRepository,
            data::CustomerQuery,
            records::{CustomerField, CustomerRecord},
        },
        orders::{
            data::NewOrder,
            errors::OrdersServiceError,
            records::{OrderId, OrderLine, OrderSummary, OrderWithItems},
            repository::SqliteOrdersRepository,
        },
        query::Predicate,
        tags::{EntityRef, SqliteTagsRepository},
    },
};

#[derive(Debug, Clone)]
pub struct SqliteOrdersService {
    db: Db,
    repository: SqliteOrdersRepository,
    customers: SqliteCustomersRepository,
    tags: SqliteTagsRepository,
}

impl SqliteOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqliteOrdersRepository::new(),
            customers: SqliteCustomersRepository::new(),
            tags: SqliteTagsRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for SqliteOrdersService {
    async fn place_order(&self, order: NewOrder) -> Result<OrderWithItems, OrdersServiceError> {
        if order.items.is_empty() || order.items.iter().any(|item| item.quantity == 0) {
            return Err(OrdersServiceError::InvalidData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_order(&mut tx, order.customer, Timestamp::now())
            .await?;

        let mut items = Vec::with_capacity(order.items.len());

        for item in &order.items {
            let unit_price = self
                .repository
                .get_product_price(&mut tx, item.product)
                .await?
                .ok_or(OrdersServiceError::InvalidReference)?;

            let created_item = self
                .repository
                .create_order_item(&mut tx, created.id, item.product, item.quantity, unit_price)
                .await?;

            items.push(created_item);
        }

        tx.commit().await?;

        info!(
            order_id = created.id.into_i64(),
            customer_id = order.customer.into_i64(),
            item_count = items.len(),
            "order placed"
        );

        Ok(OrderWithItems {
            order: created,
            items,
        })
    }

    async fn get_order(&self, order: OrderId) -> Result<OrderWithItems, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let order = self.repository.get_order(&mut tx, order).await?;

        let items = self
            .repository
            .list_order_lines(&mut tx, &[order.id])
            .await?
            .into_iter()
            .map(|line| line.item)
            .collect();

        tx.commit().await?;

        Ok(OrderWithItems { order, items })
    }

    async fn list_recent_orders(
        &self,
        limit: u32,
    ) -> Result<Vec<OrderSummary>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let orders = self.repository.list_recent_orders(&mut tx, limit).await?;

        let order_ids: Vec<OrderId> = orders.iter().map(|order| order.id).collect();

        let mut lines: FxHashMap<OrderId, Vec<OrderLine>> = FxHashMap::default();

        for line in self.repository.list_order_lines(&mut tx, &order_ids).await? {
            lines.entry(line.item.order).or_default().push(line);
        }

        let customer_query = CustomerQuery::new().filter(Predicate::in_(
            CustomerField::Id,
            orders.iter().map(|order| order.customer.into_i64()),
        ));

        let customers: FxHashMap<_, CustomerRecord> = self
            .customers
            .list_customers(&mut tx, &customer_query)
            .await?
            .into_iter()
            .map(|customer| (customer.id, customer))
            .collect();

        tx.commit().await?;

        orders
            .into_iter()
            .map(|order| {
                let customer = customers
                    .get(&order.customer)
                    .cloned()
                    .ok_or(OrdersServiceError::NotFound)?;

                Ok(OrderSummary {
                    lines: lines.remove(&order.id).unwrap_or_default(),
                    order,
                    customer,
                })
            })
            .collect()
    }

    async fn order_total(&self, order: OrderId) -> Result<u64, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.repository.get_order(&mut tx, order).await?;

        let total = self.repository.order_total(&mut tx, order).await?;

        tx.commit().await?;

        Ok(total)
    }

    async fn delete_order(&self, order: OrderId) -> Result<(), OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.delete_order(&mut tx, order).await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        self.tags
            .delete_entity_references(&mut tx, &[EntityRef::Order(order)])
            .await?;

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Places an order atomically, capturing each product's current unit price.
    ///
    /// Either the order and every item are stored, or nothing is.
    async fn place_order(&self, order: NewOrder) -> Result<OrderWithItems, OrdersServiceError>;

    /// Retrieve a single order with its items.
    async fn get_order(&self, order: OrderId) -> Result<OrderWithItems, OrdersServiceError>;

    /// Newest orders first, each with its customer and titled items.
    async fn list_recent_orders(&self, limit: u32)
    -> Result<Vec<OrderSummary>, OrdersServiceError>;

    /// Sum of quantity times captured unit price over the order's items.
    async fn order_total(&self, order: OrderId) -> Result<u64, OrdersServiceError>;

    /// Deletes an order and its items.
    async fn delete_order(&self, order: OrderId) -> Result<(), OrdersServiceError>;
}
