//! Tags
//!
//! Tags and likes attach to any registered entity type through a content type registry row
//! and a plain object id, rather than a foreign key per entity.

pub mod content_type;
pub mod data;
pub mod entity;
pub mod errors;
pub mod records;
mod repository;
pub mod service;
mod taggable;

pub use content_type::{ContentType, UnknownContentType};
pub use entity::EntityRef;
pub use errors::TagsServiceError;
pub(crate) use repository::SqliteTagsRepository;
pub use service::*;
pub use taggable::Taggable;
