//! Collections Data

use crate::domain::products::records::ProductId;

/// New Collection Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCollection {
    pub title: String,
    pub featured_product: Option<ProductId>,
}

/// Collection Update Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionUpdate {
    pub title: String,
    pub featured_product: Option<ProductId>,
}
