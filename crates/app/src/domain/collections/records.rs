//! Collection Records

use crate::{
    domain::{
        products::records::ProductId,
        query::QueryField,
        tags::{ContentType, Taggable},
    },
    ids::TypedId,
};

/// Collection ID
pub type CollectionId = TypedId<CollectionRecord>;

/// Collection Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionRecord {
    pub id: CollectionId,
    pub title: String,
    pub featured_product: Option<ProductId>,
}

impl Taggable for CollectionRecord {
    fn content_type() -> ContentType {
        ContentType::Collection
    }
}

/// Filterable collection columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectionField {
    Id,
    Title,
    FeaturedProductId,
}

impl QueryField for CollectionField {
    const ID: Self = Self::Id;

    fn column(self) -> &'static str {
        match self {
            Self::Id => "collections.id",
            Self::Title => "collections.title",
            Self::FeaturedProductId => "collections.featured_product_id",
        }
    }
}
