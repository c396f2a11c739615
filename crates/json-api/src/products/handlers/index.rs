//! Product Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::{
    products::{
        data::ProductQuery,
        records::{ProductField, ProductWithCollection},
    },
    query::{OrderBy, Predicate, Value},
};

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductListItem {
    #[serde(flatten)]
    pub product: ProductResponse,

    /// Title of the product's collection
    pub collection_title: String,
}

impl From<ProductWithCollection> for ProductListItem {
    fn from(row: ProductWithCollection) -> Self {
        ProductListItem {
            product: row.product.into(),
            collection_title: row.collection_title,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The list of products
    pub products: Vec<ProductListItem>,
}

/// Builds the product query from optional request filters.
pub(crate) fn product_query(
    collection_id: Option<i64>,
    min_price: Option<u64>,
    max_price: Option<u64>,
    title: Option<String>,
    ordering: Option<&str>,
    limit: Option<u32>,
) -> Result<ProductQuery, StatusError> {
    let mut query = ProductQuery::new();

    if let Some(collection_id) = collection_id {
        query = query.filter(Predicate::eq(ProductField::CollectionId, collection_id));
    }

    if let Some(min_price) = min_price {
        query = query.filter(Predicate::gte(ProductField::UnitPrice, Value::amount(min_price)));
    }

    if let Some(max_price) = max_price {
        query = query.filter(Predicate::lte(ProductField::UnitPrice, Value::amount(max_price)));
    }

    if let Some(title) = title.filter(|title| !title.is_empty()) {
        query = query.filter(Predicate::icontains(ProductField::Title, title));
    }

    if let Some(ordering) = ordering {
        for order in OrderBy::<ProductField>::parse_list(ordering)
            .or_400("could not parse \"ordering\" query parameter")?
        {
            query = query.order_by(order);
        }
    }

    if let Some(limit) = limit {
        query = query.limit(limit);
    }

    Ok(query)
}

/// Product Index Handler
///
/// Returns products with their collection titles, optionally filtered and ordered.
#[endpoint(
    tags("products"),
    summary = "List Products",
    responses(
        (status_code = StatusCode::OK, description = "Matching products"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    collection_id: QueryParam<i64, false>,
    min_price: QueryParam<u64, false>,
    max_price: QueryParam<u64, false>,
    title: QueryParam<String, false>,
    ordering: QueryParam<String, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let query = product_query(
        collection_id.into_inner(),
        min_price.into_inner(),
        max_price.into_inner(),
        title.into_inner(),
        ordering.into_inner().as_deref(),
        limit.into_inner(),
    )?;

    let products = state
        .app
        .products
        .list_products_with_collection(query)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}
