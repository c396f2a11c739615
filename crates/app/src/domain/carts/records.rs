//! Cart Records

use jiff::Timestamp;

use crate::{
    domain::products::records::ProductId,
    ids::{TypedId, TypedUuid},
};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Cart Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub items: Vec<CartItemRecord>,
    pub created_at: Timestamp,
}

impl CartRecord {
    /// Sum of the items at current catalog prices.
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.items
            .iter()
            .map(CartItemRecord::line_total)
            .fold(0, u64::saturating_add)
    }
}

/// Cart Item ID
pub type CartItemId = TypedId<CartItemRecord>;

/// Cart Item Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemRecord {
    pub id: CartItemId,
    pub product: ProductId,
    pub product_title: String,
    pub quantity: u32,

    /// Current catalog price of the product.
    pub unit_price: u64,
}

impl CartItemRecord {
    #[must_use]
    pub fn line_total(&self) -> u64 {
        u64::from(self.quantity).saturating_mul(self.unit_price)
    }
}
