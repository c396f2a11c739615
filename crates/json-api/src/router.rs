//! App Router

use salvo::Router;

use crate::{admin, healthcheck, orders, products, tags};

pub fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::with_path("product")
                .get(products::index::handler)
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
        .push(Router::with_path("tags/{content_type}/{object_id}").get(tags::get::handler))
        .push(
            Router::with_path("orders")
                .post(orders::create::handler)
                .push(Router::with_path("{order}").get(orders::get::handler)),
        )
        .push(
            Router::with_path("admin")
                .push(
                    Router::with_path("products")
                        .get(admin::products::handler)
                        .push(
                            Router::with_path("clear-inventory")
                                .post(admin::clear_inventory::handler),
                        )
                        .push(
                            Router::with_path("{product}").patch(admin::update_price::handler),
                        ),
                )
                .push(Router::with_path("collections").get(admin::collections::handler))
                .push(Router::with_path("customers").get(admin::customers::handler))
                .push(Router::with_path("orders").get(admin::orders::handler))
                .push(
                    Router::with_path("autocomplete/{target}").get(admin::autocomplete::handler),
                ),
        )
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::{
        affix_state::inject,
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::{
        admin::records::ActionOutcome,
        collections::records::CollectionId,
        products::records::{ProductId, ProductRecord},
    };

    use crate::{products::get::ProductResponse, test_helpers::MockServices};

    use super::*;

    fn make_service(mocks: MockServices) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(mocks.into_state()))
                .push(app_router()),
        )
    }

    #[tokio::test]
    async fn product_detail_is_routed_by_id() -> TestResult {
        let mut mocks = MockServices::default();

        mocks
            .products
            .expect_get_product()
            .once()
            .withf(|id| *id == ProductId::from_i64(1))
            .return_once(|id| {
                Ok(ProductRecord {
                    id,
                    title: "Wine - Red".to_owned(),
                    slug: Some("wine-red".to_owned()),
                    description: None,
                    unit_price: 12_00,
                    inventory: 40,
                    last_update: Timestamp::UNIX_EPOCH,
                    collection: CollectionId::from_i64(2),
                })
            });

        let mut res = TestClient::get("http://example.com/product/1")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: ProductResponse = res.take_json().await?;

        assert_eq!(body.slug.as_deref(), Some("wine-red"));

        Ok(())
    }

    #[tokio::test]
    async fn clear_inventory_is_not_taken_for_a_product_id() -> TestResult {
        let mut mocks = MockServices::default();

        mocks.admin.expect_update_unit_price().never();
        mocks
            .admin
            .expect_clear_inventory()
            .once()
            .return_once(|_| Ok(ActionOutcome::products_updated(0)));

        let res = TestClient::post("http://example.com/admin/products/clear-inventory")
            .json(&json!({ "ids": [] }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn healthcheck_is_routed() -> TestResult {
        let res = TestClient::get("http://example.com/healthcheck")
            .send(&make_service(MockServices::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
