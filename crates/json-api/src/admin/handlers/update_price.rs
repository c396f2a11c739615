//! Update Unit Price Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::products::records::ProductId;

use crate::{
    admin::{errors::into_status_error, products::ProductRowResponse},
    extensions::*,
    state::State,
};

/// Update Unit Price Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateUnitPriceRequest {
    /// New price in minor units
    pub unit_price: u64,
}

/// Update Unit Price Handler
///
/// Edits a product's price in place and returns its change list row.
#[endpoint(
    tags("admin"),
    summary = "Update Unit Price",
    responses(
        (status_code = StatusCode::OK, description = "Price updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<i64>,
    json: JsonBody<UpdateUnitPriceRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductRowResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let row = state
        .app
        .admin
        .update_unit_price(
            ProductId::from_i64(product.into_inner()),
            json.into_inner().unit_price,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(row.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::admin::{
        AdminServiceError,
        records::{InventoryStatus, ProductChangeRow},
    };

    use crate::test_helpers::MockServices;

    use super::*;

    fn make_service(mocks: MockServices) -> Service {
        mocks.into_service(Router::with_path("admin/products/{product}").patch(handler))
    }

    #[tokio::test]
    async fn test_update_unit_price_returns_row() -> TestResult {
        let mut mocks = MockServices::default();

        mocks
            .admin
            .expect_update_unit_price()
            .once()
            .withf(|product, unit_price| {
                *product == ProductId::from_i64(4) && *unit_price == 12_50
            })
            .return_once(|product, unit_price| {
                Ok(ProductChangeRow {
                    id: product,
                    title: "Lipstick".to_owned(),
                    unit_price,
                    inventory: 30,
                    inventory_status: InventoryStatus::Ok,
                    collection_title: "Beauty".to_owned(),
                    featured_product_title: None,
                })
            });

        let mut res = TestClient::patch("http://example.com/admin/products/4")
            .json(&json!({ "unit_price": 12_50 }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: ProductRowResponse = res.take_json().await?;

        assert_eq!(body.id, 4);
        assert_eq!(body.unit_price, 12_50);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_unit_price_unknown_product_returns_404() -> TestResult {
        let mut mocks = MockServices::default();

        mocks
            .admin
            .expect_update_unit_price()
            .once()
            .return_once(|_, _| Err(AdminServiceError::NotFound));

        let res = TestClient::patch("http://example.com/admin/products/404")
            .json(&json!({ "unit_price": 1_00 }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_unit_price_negative_price_returns_400() -> TestResult {
        let mut mocks = MockServices::default();

        mocks.admin.expect_update_unit_price().never();

        let res = TestClient::patch("http://example.com/admin/products/4")
            .json(&json!({ "unit_price": -5 }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
