//! Get Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::products::records::{ProductId, ProductRecord};

use crate::{extensions::*, products::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub id: i64,

    pub title: String,

    pub slug: Option<String>,

    pub description: Option<String>,

    /// The price of the product in minor units
    pub unit_price: u64,

    /// Units in stock
    pub inventory: u32,

    /// The date and time the product was last updated
    pub last_update: String,

    /// The collection the product belongs to
    pub collection_id: i64,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            id: product.id.into_i64(),
            title: product.title,
            slug: product.slug,
            description: product.description,
            unit_price: product.unit_price,
            inventory: product.inventory,
            last_update: product.last_update.to_string(),
            collection_id: product.collection.into_i64(),
        }
    }
}

/// Get Product Handler
///
/// Returns a product.
#[endpoint(
    tags("products"),
    summary = "Get Product",
    responses(
        (status_code = StatusCode::OK, description = "Product found"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .get_product(ProductId::from_i64(product.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::products::ProductsServiceError;

    use crate::{products::handlers::tests::make_product, test_helpers::MockServices};

    use super::*;

    fn make_service(mocks: MockServices) -> Service {
        mocks.into_service(Router::with_path("product/{product}").get(handler))
    }

    #[tokio::test]
    async fn test_get_returns_200() -> TestResult {
        let mut mocks = MockServices::default();

        mocks
            .products
            .expect_get_product()
            .once()
            .withf(|id| *id == ProductId::from_i64(7))
            .return_once(|_| Ok(make_product(7, "Bread Ww Cluster", 4_16)));

        let mut res = TestClient::get("http://example.com/product/7")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: ProductResponse = res.take_json().await?;

        assert_eq!(body.id, 7);
        assert_eq!(body.title, "Bread Ww Cluster");
        assert_eq!(body.unit_price, 4_16);
        assert_eq!(body.collection_id, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_product_returns_404() -> TestResult {
        let mut mocks = MockServices::default();

        mocks
            .products
            .expect_get_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::NotFound));

        let res = TestClient::get("http://example.com/product/999")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_non_numeric_id_returns_400() -> TestResult {
        let mut mocks = MockServices::default();

        mocks.products.expect_get_product().never();

        let res = TestClient::get("http://example.com/product/abc")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
