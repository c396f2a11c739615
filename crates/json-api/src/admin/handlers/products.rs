//! Product Change List Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::{
    admin::{
        data::{InventoryFilter, LastUpdateFilter, ProductChangeListParams},
        records::{Page, ProductChangeRow},
    },
    collections::records::CollectionId,
    products::records::ProductField,
    query::OrderBy,
};

use crate::{admin::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductRowResponse {
    pub id: i64,
    pub title: String,
    pub unit_price: u64,
    pub inventory: u32,

    /// `low` below ten units, otherwise `ok`
    pub inventory_status: String,

    pub collection_title: String,

    /// Title of the collection's featured product, when it has one
    pub featured_product_title: Option<String>,
}

impl From<ProductChangeRow> for ProductRowResponse {
    fn from(row: ProductChangeRow) -> Self {
        ProductRowResponse {
            id: row.id.into_i64(),
            title: row.title,
            unit_price: row.unit_price,
            inventory: row.inventory,
            inventory_status: row.inventory_status.to_string(),
            collection_title: row.collection_title,
            featured_product_title: row.featured_product_title,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductPageResponse {
    pub items: Vec<ProductRowResponse>,
    pub page: u32,
    pub page_size: u32,
    pub page_count: u64,
    pub total_count: u64,
}

impl From<Page<ProductChangeRow>> for ProductPageResponse {
    fn from(page: Page<ProductChangeRow>) -> Self {
        ProductPageResponse {
            page_count: page.page_count(),
            page: page.page,
            page_size: page.page_size,
            total_count: page.total_count,
            items: page.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Product Change List Handler
///
/// Returns one page of products, ten at a time.
#[endpoint(
    tags("admin"),
    summary = "Product Change List",
    responses(
        (status_code = StatusCode::OK, description = "One page of products"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    collection_id: QueryParam<i64, false>,
    last_update: QueryParam<String, false>,
    inventory: QueryParam<String, false>,
    ordering: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductPageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let mut params = ProductChangeListParams::new(Timestamp::now());

    params.page = page.into_inner().unwrap_or(1);
    params.collection = collection_id.into_inner().map(CollectionId::from_i64);
    params.last_update = last_update
        .into_inner()
        .map(|value| value.parse::<LastUpdateFilter>())
        .transpose()
        .or_400("could not parse \"last_update\" query parameter")?;
    params.inventory = inventory
        .into_inner()
        .map(|value| value.parse::<InventoryFilter>())
        .transpose()
        .or_400("could not parse \"inventory\" query parameter")?;

    if let Some(ordering) = ordering.into_inner() {
        params.ordering = OrderBy::<ProductField>::parse_list(&ordering)
            .or_400("could not parse \"ordering\" query parameter")?;
    }

    let page = state
        .app
        .admin
        .product_changelist(params)
        .await
        .map_err(into_status_error)?;

    Ok(Json(page.into()))
}
