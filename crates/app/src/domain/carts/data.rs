//! Cart Data

use crate::domain::{carts::records::CartUuid, products::records::ProductId};

/// New Cart Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCart {
    pub uuid: CartUuid,
}

/// New Cart Item Data
///
/// Adding a product that is already in the cart increases its quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewCartItem {
    pub product: ProductId,
    pub quantity: u32,
}
