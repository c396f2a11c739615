//! Products Data

use crate::domain::{
    collections::records::CollectionId,
    products::records::ProductField,
    query::Query,
};

/// Filter, ordering and window over products.
pub type ProductQuery = Query<ProductField>;

/// New Product Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub title: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub unit_price: u64,
    pub inventory: u32,
    pub collection: CollectionId,
}

/// Product Update Data
///
/// Every mutable field is replaced; the last update timestamp is refreshed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductUpdate {
    pub title: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub unit_price: u64,
    pub inventory: u32,
    pub collection: CollectionId,
}

/// New Promotion Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewPromotion {
    pub description: String,

    /// Fraction of the price taken off, between 0 and 1.
    pub discount: f64,
}
