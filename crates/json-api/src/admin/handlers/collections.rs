//! Collection Change List Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::{
    admin::{data::CollectionChangeField, records::CollectionChangeRow},
    query::OrderBy,
};

use crate::{admin::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CollectionRowResponse {
    pub id: i64,
    pub title: String,
    pub product_count: u64,

    /// Product change list filtered to this collection
    pub products_link: String,
}

impl From<CollectionChangeRow> for CollectionRowResponse {
    fn from(row: CollectionChangeRow) -> Self {
        CollectionRowResponse {
            id: row.id.into_i64(),
            title: row.title,
            product_count: row.product_count,
            products_link: row.products_link,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CollectionsResponse {
    pub collections: Vec<CollectionRowResponse>,
}

/// Collection Change List Handler
///
/// Returns every collection with its product count.
#[endpoint(
    tags("admin"),
    summary = "Collection Change List",
    responses(
        (status_code = StatusCode::OK, description = "Collections with product counts"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    ordering: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<CollectionsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let ordering = ordering
        .into_inner()
        .map(|ordering| OrderBy::<CollectionChangeField>::parse_list(&ordering))
        .transpose()
        .or_400("could not parse \"ordering\" query parameter")?
        .unwrap_or_default();

    let collections = state
        .app
        .admin
        .collection_changelist(ordering)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CollectionsResponse {
        collections: collections.into_iter().map(Into::into).collect(),
    }))
}
