//! Order Records

use jiff::Timestamp;

use crate::{
    domain::{
        customers::records::{CustomerId, CustomerRecord},
        products::records::ProductId,
        tags::{ContentType, Taggable},
    },
    ids::TypedId,
};

/// Order ID
pub type OrderId = TypedId<OrderRecord>;

/// Order Record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderRecord {
    pub id: OrderId,
    pub placed_at: Timestamp,
    pub customer: CustomerId,
}

impl Taggable for OrderRecord {
    fn content_type() -> ContentType {
        ContentType::Order
    }
}

/// Order Item ID
pub type OrderItemId = TypedId<OrderItemRecord>;

/// Order Item Record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderItemRecord {
    pub id: OrderItemId,
    pub order: OrderId,
    pub product: ProductId,
    pub quantity: u32,

    /// Price per unit at the time the order was placed.
    pub unit_price: u64,
}

impl OrderItemRecord {
    #[must_use]
    pub fn line_total(&self) -> u64 {
        u64::from(self.quantity).saturating_mul(self.unit_price)
    }
}

/// An order together with its items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderWithItems {
    pub order: OrderRecord,
    pub items: Vec<OrderItemRecord>,
}

impl OrderWithItems {
    #[must_use]
    pub fn total(&self) -> u64 {
        self.items
            .iter()
            .map(OrderItemRecord::line_total)
            .fold(0, u64::saturating_add)
    }
}

/// An order item with the title of its product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub item: OrderItemRecord,
    pub product_title: String,
}

/// An order with its customer and titled items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub order: OrderRecord,
    pub customer: CustomerRecord,
    pub lines: Vec<OrderLine>,
}
