//! Tags Repository

use sqlx::{
    FromRow, QueryBuilder, Row, Sqlite, Transaction, query, query_as, query_scalar,
    sqlite::SqliteRow,
};
use tracing::debug;

use crate::domain::{
    tags::{
        ContentType, EntityRef,
        records::{
            ContentTypeId, LikedItemId, LikedItemRecord, TagId, TagRecord, TaggedItemId,
            TaggedItemRecord,
        },
    },
    users::records::{UserId, UserRecord},
};

const REGISTER_CONTENT_TYPE_SQL: &str = include_str!("sql/register_content_type.sql");
const FIND_CONTENT_TYPE_SQL: &str = include_str!("sql/find_content_type.sql");
const CREATE_TAG_SQL: &str = include_str!("sql/create_tag.sql");
const GET_TAG_SQL: &str = include_str!("sql/get_tag.sql");
const DELETE_TAG_SQL: &str = include_str!("sql/delete_tag.sql");
const CREATE_TAGGED_ITEM_SQL: &str = include_str!("sql/create_tagged_item.sql");
const DELETE_TAGGED_ITEM_SQL: &str = include_str!("sql/delete_tagged_item.sql");
const LIST_ENTITY_TAGS_SQL: &str = include_str!("sql/list_entity_tags.sql");
const CREATE_LIKED_ITEM_SQL: &str = include_str!("sql/create_liked_item.sql");
const DELETE_LIKED_ITEM_SQL: &str = include_str!("sql/delete_liked_item.sql");
const LIST_ENTITY_LIKES_SQL: &str = include_str!("sql/list_entity_likes.sql");
const DELETE_ENTITY_TAGGED_ITEMS_SQL: &str = include_str!("sql/delete_entity_tagged_items.sql");
const DELETE_ENTITY_LIKED_ITEMS_SQL: &str = include_str!("sql/delete_entity_liked_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteTagsRepository;

impl SqliteTagsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    #[tracing::instrument(
        name = "tags.repository.register_content_type",
        skip(self, tx),
        fields(content_type_id = tracing::field::Empty),
        err
    )]
    pub(crate) async fn register_content_type(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        content_type: ContentType,
    ) -> Result<ContentTypeId, sqlx::Error> {
        let id: i64 = query_scalar(REGISTER_CONTENT_TYPE_SQL)
            .bind(content_type.model())
            .fetch_one(&mut **tx)
            .await?;

        tracing::Span::current().record("content_type_id", id);

        debug!(model = content_type.model(), id, "registered content type");

        Ok(ContentTypeId::from_i64(id))
    }

    pub(crate) async fn find_content_type(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        content_type: ContentType,
    ) -> Result<Option<ContentTypeId>, sqlx::Error> {
        let id: Option<i64> = query_scalar(FIND_CONTENT_TYPE_SQL)
            .bind(content_type.model())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(id.map(ContentTypeId::from_i64))
    }

    /// Whether the referenced row currently exists in its backing table.
    pub(crate) async fn entity_exists(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        entity: EntityRef,
    ) -> Result<bool, sqlx::Error> {
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT EXISTS (SELECT 1 FROM ");

        builder.push(entity.content_type().table());
        builder.push(" WHERE id = ");
        builder.push_bind(entity.object_id());
        builder.push(")");

        let exists: i64 = builder
            .build_query_scalar::<i64>()
            .fetch_one(&mut **tx)
            .await?;

        Ok(exists != 0)
    }

    pub(crate) async fn create_tag(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        label: &str,
    ) -> Result<TagRecord, sqlx::Error> {
        query_as::<Sqlite, TagRecord>(CREATE_TAG_SQL)
            .bind(label)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_tag(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        tag: TagId,
    ) -> Result<TagRecord, sqlx::Error> {
        query_as::<Sqlite, TagRecord>(GET_TAG_SQL)
            .bind(tag.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_tag(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        tag: TagId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_TAG_SQL)
            .bind(tag.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn create_tagged_item(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        tag: TagId,
        content_type: ContentTypeId,
        entity: EntityRef,
    ) -> Result<TaggedItemRecord, sqlx::Error> {
        let id: i64 = query_scalar(CREATE_TAGGED_ITEM_SQL)
            .bind(tag.into_i64())
            .bind(content_type.into_i64())
            .bind(entity.object_id())
            .fetch_one(&mut **tx)
            .await?;

        Ok(TaggedItemRecord {
            id: TaggedItemId::from_i64(id),
            tag,
            entity,
        })
    }

    pub(crate) async fn delete_tagged_item(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        tag: TagId,
        content_type: ContentTypeId,
        entity: EntityRef,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_TAGGED_ITEM_SQL)
            .bind(tag.into_i64())
            .bind(content_type.into_i64())
            .bind(entity.object_id())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_entity_tags(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        content_type: ContentTypeId,
        entity: EntityRef,
    ) -> Result<Vec<TagRecord>, sqlx::Error> {
        query_as::<Sqlite, TagRecord>(LIST_ENTITY_TAGS_SQL)
            .bind(content_type.into_i64())
            .bind(entity.object_id())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_liked_item(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        user: UserId,
        content_type: ContentTypeId,
        entity: EntityRef,
    ) -> Result<LikedItemRecord, sqlx::Error> {
        let id: i64 = query_scalar(CREATE_LIKED_ITEM_SQL)
            .bind(user.into_i64())
            .bind(content_type.into_i64())
            .bind(entity.object_id())
            .fetch_one(&mut **tx)
            .await?;

        Ok(LikedItemRecord {
            id: LikedItemId::from_i64(id),
            user,
            entity,
        })
    }

    pub(crate) async fn delete_liked_item(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        user: UserId,
        content_type: ContentTypeId,
        entity: EntityRef,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_LIKED_ITEM_SQL)
            .bind(user.into_i64())
            .bind(content_type.into_i64())
            .bind(entity.object_id())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_entity_likes(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        content_type: ContentTypeId,
        entity: EntityRef,
    ) -> Result<Vec<UserRecord>, sqlx::Error> {
        query_as::<Sqlite, UserRecord>(LIST_ENTITY_LIKES_SQL)
            .bind(content_type.into_i64())
            .bind(entity.object_id())
            .fetch_all(&mut **tx)
            .await
    }

    #[tracing::instrument(
        name = "tags.repository.delete_entity_references",
        skip(self, tx, entities),
        fields(
            entity_count = tracing::field::Empty,
            deleted_count = tracing::field::Empty
        ),
        err
    )]
    pub(crate) async fn delete_entity_references(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        entities: &[EntityRef],
    ) -> Result<u64, sqlx::Error> {
        tracing::Span::current().record("entity_count", entities.len());

        let mut deleted_count = 0;

        for entity in entities {
            for sql in [DELETE_ENTITY_TAGGED_ITEMS_SQL, DELETE_ENTITY_LIKED_ITEMS_SQL] {
                deleted_count += query(sql)
                    .bind(entity.object_id())
                    .bind(entity.content_type().model())
                    .execute(&mut **tx)
                    .await?
                    .rows_affected();
            }
        }

        tracing::Span::current().record("deleted_count", deleted_count);

        debug!(deleted_count, "deleted tags and likes of removed entities");

        Ok(deleted_count)
    }
}

impl<'r> FromRow<'r, SqliteRow> for TagRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: TagId::from_i64(row.try_get("id")?),
            label: row.try_get("label")?,
        })
    }
}
