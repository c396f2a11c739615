//! Tags service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Sqlite, Transaction};

use crate::{
    database::Db,
    domain::{
        tags::{
            ContentType, EntityRef,
            data::NewTag,
            errors::TagsServiceError,
            records::{
                ContentTypeId, ContentTypeRecord, LikedItemRecord, TagId, TagRecord,
                TaggedItemRecord,
            },
            repository::SqliteTagsRepository,
        },
        users::records::{UserId, UserRecord},
    },
};

#[derive(Debug, Clone)]
pub struct SqliteTagsService {
    db: Db,
    repository: SqliteTagsRepository,
}

impl SqliteTagsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqliteTagsRepository::new(),
        }
    }

    async fn registered_content_type(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        content_type: ContentType,
    ) -> Result<ContentTypeId, TagsServiceError> {
        self.repository
            .find_content_type(tx, content_type)
            .await?
            .ok_or(TagsServiceError::NotFound)
    }

    /// Resolve the registry id of a live entity.
    async fn live_entity(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        entity: EntityRef,
    ) -> Result<ContentTypeId, TagsServiceError> {
        let content_type = self
            .registered_content_type(tx, entity.content_type())
            .await?;

        if !self.repository.entity_exists(tx, entity).await? {
            return Err(TagsServiceError::NotFound);
        }

        Ok(content_type)
    }
}

#[async_trait]
impl TagsService for SqliteTagsService {
    async fn register_content_type(
        &self,
        content_type: ContentType,
    ) -> Result<ContentTypeRecord, TagsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let id = self
            .repository
            .register_content_type(&mut tx, content_type)
            .await?;

        tx.commit().await?;

        Ok(ContentTypeRecord { id, content_type })
    }

    async fn register_all_content_types(
        &self,
    ) -> Result<Vec<ContentTypeRecord>, TagsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut registered = Vec::with_capacity(ContentType::ALL.len());

        for content_type in ContentType::ALL {
            let id = self
                .repository
                .register_content_type(&mut tx, content_type)
                .await?;

            registered.push(ContentTypeRecord { id, content_type });
        }

        tx.commit().await?;

        Ok(registered)
    }

    async fn create_tag(&self, tag: NewTag) -> Result<TagRecord, TagsServiceError> {
        if tag.label.trim().is_empty() {
            return Err(TagsServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_tag(&mut tx, &tag.label).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn delete_tag(&self, tag: TagId) -> Result<(), TagsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.delete_tag(&mut tx, tag).await?;

        if rows_affected == 0 {
            return Err(TagsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn tag_entity(
        &self,
        tag: TagId,
        entity: EntityRef,
    ) -> Result<TaggedItemRecord, TagsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let content_type = self.live_entity(&mut tx, entity).await?;

        self.repository.get_tag(&mut tx, tag).await?;

        let tagged = self
            .repository
            .create_tagged_item(&mut tx, tag, content_type, entity)
            .await?;

        tx.commit().await?;

        Ok(tagged)
    }

    async fn untag_entity(&self, tag: TagId, entity: EntityRef) -> Result<(), TagsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let content_type = self
            .registered_content_type(&mut tx, entity.content_type())
            .await?;

        let rows_affected = self
            .repository
            .delete_tagged_item(&mut tx, tag, content_type, entity)
            .await?;

        if rows_affected == 0 {
            return Err(TagsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn tags_for(&self, entity: EntityRef) -> Result<Vec<TagRecord>, TagsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let content_type = self
            .registered_content_type(&mut tx, entity.content_type())
            .await?;

        let tags = self
            .repository
            .list_entity_tags(&mut tx, content_type, entity)
            .await?;

        tx.commit().await?;

        Ok(tags)
    }

    async fn like_entity(
        &self,
        user: UserId,
        entity: EntityRef,
    ) -> Result<LikedItemRecord, TagsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let content_type = self.live_entity(&mut tx, entity).await?;

        let liked = self
            .repository
            .create_liked_item(&mut tx, user, content_type, entity)
            .await?;

        tx.commit().await?;

        Ok(liked)
    }

    async fn unlike_entity(&self, user: UserId, entity: EntityRef) -> Result<(), TagsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let content_type = self
            .registered_content_type(&mut tx, entity.content_type())
            .await?;

        let rows_affected = self
            .repository
            .delete_liked_item(&mut tx, user, content_type, entity)
            .await?;

        if rows_affected == 0 {
            return Err(TagsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn likes_for(&self, entity: EntityRef) -> Result<Vec<UserRecord>, TagsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let content_type = self
            .registered_content_type(&mut tx, entity.content_type())
            .await?;

        let users = self
            .repository
            .list_entity_likes(&mut tx, content_type, entity)
            .await?;

        tx.commit().await?;

        Ok(users)
    }
}

#[automock]
#[async_trait]
pub trait TagsService: Send + Sync {
    /// Registers a content type, returning its existing registry row when already present.
    async fn register_content_type(
        &self,
        content_type: ContentType,
    ) -> Result<ContentTypeRecord, TagsServiceError>;

    /// Registers every known content type.
    async fn register_all_content_types(&self)
    -> Result<Vec<ContentTypeRecord>, TagsServiceError>;

    /// Creates a new tag.
    async fn create_tag(&self, tag: NewTag) -> Result<TagRecord, TagsServiceError>;

    /// Deletes a tag and every application of it.
    async fn delete_tag(&self, tag: TagId) -> Result<(), TagsServiceError>;

    /// Applies a tag to a live entity of a registered content type.
    async fn tag_entity(
        &self,
        tag: TagId,
        entity: EntityRef,
    ) -> Result<TaggedItemRecord, TagsServiceError>;

    /// Removes a tag from an entity.
    async fn untag_entity(&self, tag: TagId, entity: EntityRef) -> Result<(), TagsServiceError>;

    /// Tags applied to exactly this entity.
    ///
    /// Returns [`TagsServiceError::NotFound`] when the entity's content type was never
    /// registered; a registered but untagged entity yields an empty list.
    async fn tags_for(&self, entity: EntityRef) -> Result<Vec<TagRecord>, TagsServiceError>;

    /// Records that a user likes a live entity.
    async fn like_entity(
        &self,
        user: UserId,
        entity: EntityRef,
    ) -> Result<LikedItemRecord, TagsServiceError>;

    /// Removes a user's like.
    async fn unlike_entity(&self, user: UserId, entity: EntityRef) -> Result<(), TagsServiceError>;

    /// Users who like exactly this entity.
    async fn likes_for(&self, entity: EntityRef) -> Result<Vec<UserRecord>, TagsServiceError>;
}
