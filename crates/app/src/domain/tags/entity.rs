//! Entity References

use crate::{
    domain::{
        collections::records::CollectionId,
        customers::records::CustomerId,
        orders::records::OrderId,
        products::records::ProductId,
        tags::{ContentType, Taggable},
    },
    ids::TypedId,
};

/// A reference to any taggable entity: its content type plus its object id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityRef {
    Product(ProductId),
    Collection(CollectionId),
    Customer(CustomerId),
    Order(OrderId),
}

impl EntityRef {
    /// Reference the record identified by `id`.
    #[must_use]
    pub fn of<T>(id: TypedId<T>) -> Self
    where
        TypedId<T>: Taggable,
    {
        Self::from_parts(TypedId::<T>::content_type(), id.into_i64())
    }

    #[must_use]
    pub const fn from_parts(content_type: ContentType, object_id: i64) -> Self {
        match content_type {
            ContentType::Product => Self::Product(ProductId::from_i64(object_id)),
            ContentType::Collection => Self::Collection(CollectionId::from_i64(object_id)),
            ContentType::Customer => Self::Customer(CustomerId::from_i64(object_id)),
            ContentType::Order => Self::Order(OrderId::from_i64(object_id)),
        }
    }

    #[must_use]
    pub const fn content_type(self) -> ContentType {
        match self {
            Self::Product(_) => ContentType::Product,
            Self::Collection(_) => ContentType::Collection,
            Self::Customer(_) => ContentType::Customer,
            Self::Order(_) => ContentType::Order,
        }
    }

    #[must_use]
    pub const fn object_id(self) -> i64 {
        match self {
            Self::Product(id) => id.into_i64(),
            Self::Collection(id) => id.into_i64(),
            Self::Customer(id) => id.into_i64(),
            Self::Order(id) => id.into_i64(),
        }
    }
}
