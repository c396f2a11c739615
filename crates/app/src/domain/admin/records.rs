//! Admin Records

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;

use crate::domain::{
    admin::data::LOW_INVENTORY_THRESHOLD, collections::records::CollectionId,
    orders::records::OrderId, products::records::ProductId,
};

/// Derived stock column; sorts by the underlying inventory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InventoryStatus {
    Low,
    Ok,
}

impl InventoryStatus {
    #[must_use]
    pub const fn from_inventory(inventory: u32) -> Self {
        if inventory < LOW_INVENTORY_THRESHOLD {
            Self::Low
        } else {
            Self::Ok
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Ok => "ok",
        }
    }
}

impl Display for InventoryStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductChangeRow {
    pub id: ProductId,
    pub title: String,
    pub unit_price: u64,
    pub inventory: u32,
    pub inventory_status: InventoryStatus,
    pub collection_title: String,
    pub featured_product_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionChangeRow {
    pub id: CollectionId,
    pub title: String,
    pub product_count: u64,

    /// Product change list filtered to this collection.
    pub products_link: String,
}

impl CollectionChangeRow {
    pub(crate) fn products_link(collection: CollectionId) -> String {
        format!("/admin/products?collection_id={collection}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderChangeRow {
    pub id: OrderId,
    pub placed_at: Timestamp,
    pub customer_first_name: String,
    pub customer_last_name: String,
}

/// One page of a change list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,

    /// Matching rows across every page.
    pub total_count: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub fn page_count(&self) -> u64 {
        self.total_count.div_ceil(u64::from(self.page_size.max(1)))
    }
}

/// Result of a bulk action, with the message shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub updated: u64,
    pub message: String,
}

impl ActionOutcome {
    #[must_use]
    pub fn products_updated(updated: u64) -> Self {
        Self {
            updated,
            message: format!("{updated} products were successfully updated."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutocompleteOption {
    pub id: i64,
    pub text: String,
}
