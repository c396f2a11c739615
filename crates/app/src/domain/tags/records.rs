//! Tag Records

use crate::{
    domain::{
        tags::{ContentType, EntityRef},
        users::records::UserId,
    },
    ids::TypedId,
};

/// Tag ID
pub type TagId = TypedId<TagRecord>;

/// Tag Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    pub id: TagId,
    pub label: String,
}

/// Content Type ID
pub type ContentTypeId = TypedId<ContentTypeRecord>;

/// Registered content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentTypeRecord {
    pub id: ContentTypeId,
    pub content_type: ContentType,
}

/// Tagged Item ID
pub type TaggedItemId = TypedId<TaggedItemRecord>;

/// A tag applied to an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaggedItemRecord {
    pub id: TaggedItemId,
    pub tag: TagId,
    pub entity: EntityRef,
}

/// Liked Item ID
pub type LikedItemId = TypedId<LikedItemRecord>;

/// A user's like of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikedItemRecord {
    pub id: LikedItemId,
    pub user: UserId,
    pub entity: EntityRef,
}
