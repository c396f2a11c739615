//! Entity Tags Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::tags::{ContentType, EntityRef, records::TagRecord};

use crate::{extensions::*, state::State, tags::errors::into_status_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TagResponse {
    pub id: i64,
    pub label: String,
}

impl From<TagRecord> for TagResponse {
    fn from(tag: TagRecord) -> Self {
        TagResponse {
            id: tag.id.into_i64(),
            label: tag.label,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct EntityTagsResponse {
    /// Model name of the tagged entity, e.g. `product`
    pub content_type: String,

    pub object_id: i64,

    pub tags: Vec<TagResponse>,
}

/// Entity Tags Handler
///
/// Returns the tags applied to exactly one entity.
#[endpoint(
    tags("tags"),
    summary = "Get Entity Tags",
    responses(
        (status_code = StatusCode::OK, description = "Tags of the entity"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown content type"),
        (status_code = StatusCode::NOT_FOUND, description = "Content type is not registered"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    content_type: PathParam<String>,
    object_id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<EntityTagsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let content_type = content_type
        .into_inner()
        .parse::<ContentType>()
        .or_400("could not parse content type")?;

    let entity = EntityRef::from_parts(content_type, object_id.into_inner());

    let tags = state
        .app
        .tags
        .tags_for(entity)
        .await
        .map_err(into_status_error)?;

    Ok(Json(EntityTagsResponse {
        content_type: content_type.model().to_owned(),
        object_id: entity.object_id(),
        tags: tags.into_iter().map(Into::into).collect(),
    }))
}
