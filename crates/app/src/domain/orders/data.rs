//! Orders Data

use crate::domain::{customers::records::CustomerId, products::records::ProductId};

/// New Order Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub customer: CustomerId,
    pub items: Vec<NewOrderItem>,
}

/// New Order Item Data
///
/// The unit price is captured from the catalog when the order is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderItem {
    pub product: ProductId,
    pub quantity: u32,
}
