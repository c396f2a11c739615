//! Order Handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use storefront_app::domain::orders::records::{OrderItemRecord, OrderWithItems};

pub(crate) mod create;
pub(crate) mod get;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub id: i64,
    pub product_id: i64,
    pub quantity: u32,

    /// Unit price captured when the order was placed, in minor units
    pub unit_price: u64,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        OrderItemResponse {
            id: item.id.into_i64(),
            product_id: item.product.into_i64(),
            quantity: item.quantity,
            unit_price: item.unit_price,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub id: i64,
    pub placed_at: String,
    pub customer_id: i64,
    pub items: Vec<OrderItemResponse>,

    /// Sum of quantity times unit price over every item
    pub total: u64,
}

impl From<OrderWithItems> for OrderResponse {
    fn from(order: OrderWithItems) -> Self {
        let total = order.total();

        OrderResponse {
            id: order.order.id.into_i64(),
            placed_at: order.order.placed_at.to_string(),
            customer_id: order.order.customer.into_i64(),
            items: order.items.into_iter().map(Into::into).collect(),
            total,
        }
    }
}
