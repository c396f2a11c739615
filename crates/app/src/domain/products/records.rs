//! Product Records

use std::str::FromStr;

use jiff::Timestamp;

use crate::{
    domain::{
        collections::records::CollectionId,
        query::QueryField,
        tags::{ContentType, Taggable},
    },
    ids::TypedId,
};

/// Product ID
pub type ProductId = TypedId<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub id: ProductId,
    pub title: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub unit_price: u64,
    pub inventory: u32,
    pub last_update: Timestamp,
    pub collection: CollectionId,
}

impl Taggable for ProductRecord {
    fn content_type() -> ContentType {
        ContentType::Product
    }
}

/// Product joined with the title of its collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductWithCollection {
    pub product: ProductRecord,
    pub collection_title: String,
}

/// Product annotated with its price after a discount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountedProduct {
    pub product: ProductRecord,
    pub discounted_price: u64,
}

/// Promotion ID
pub type PromotionId = TypedId<PromotionRecord>;

/// Promotion Record
#[derive(Debug, Clone, PartialEq)]
pub struct PromotionRecord {
    pub id: PromotionId,
    pub description: String,
    pub discount: f64,
}

/// Filterable and sortable product columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProductField {
    Id,
    Title,
    Slug,
    Description,
    UnitPrice,
    Inventory,
    LastUpdate,
    CollectionId,
}

impl ProductField {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Slug => "slug",
            Self::Description => "description",
            Self::UnitPrice => "unit_price",
            Self::Inventory => "inventory",
            Self::LastUpdate => "last_update",
            Self::CollectionId => "collection_id",
        }
    }
}

impl QueryField for ProductField {
    const ID: Self = Self::Id;

    fn column(self) -> &'static str {
        match self {
            Self::Id => "products.id",
            Self::Title => "products.title",
            Self::Slug => "products.slug",
            Self::Description => "products.description",
            Self::UnitPrice => "products.unit_price",
            Self::Inventory => "products.inventory",
            Self::LastUpdate => "products.last_update",
            Self::CollectionId => "products.collection_id",
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown product field: {0}")]
pub struct UnknownProductField(pub String);

impl FromStr for ProductField {
    type Err = UnknownProductField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(Self::Id),
            "title" => Ok(Self::Title),
            "slug" => Ok(Self::Slug),
            "description" => Ok(Self::Description),
            "unit_price" | "price" => Ok(Self::UnitPrice),
            "inventory" => Ok(Self::Inventory),
            "last_update" => Ok(Self::LastUpdate),
            "collection_id" | "collection" => Ok(Self::CollectionId),
            other => Err(UnknownProductField(other.to_owned())),
        }
    }
}
