//! Taggable

use crate::{domain::tags::ContentType, ids::TypedId};

/// Record types that can be referenced generically by tags and likes.
pub trait Taggable {
    fn content_type() -> ContentType;
}

impl<T> Taggable for TypedId<T>
where
    T: Taggable,
{
    fn content_type() -> ContentType {
        T::content_type()
    }
}
