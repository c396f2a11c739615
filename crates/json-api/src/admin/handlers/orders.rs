//! Order Change List Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::admin::records::{OrderChangeRow, Page};

use crate::{admin::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderRowResponse {
    pub id: i64,
    pub placed_at: String,
    pub customer_first_name: String,
    pub customer_last_name: String,
}

impl From<OrderChangeRow> for OrderRowResponse {
    fn from(row: OrderChangeRow) -> Self {
        OrderRowResponse {
            id: row.id.into_i64(),
            placed_at: row.placed_at.to_string(),
            customer_first_name: row.customer_first_name,
            customer_last_name: row.customer_last_name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderPageResponse {
    pub items: Vec<OrderRowResponse>,
    pub page: u32,
    pub page_size: u32,
    pub page_count: u64,
    pub total_count: u64,
}

impl From<Page<OrderChangeRow>> for OrderPageResponse {
    fn from(page: Page<OrderChangeRow>) -> Self {
        OrderPageResponse {
            page_count: page.page_count(),
            page: page.page,
            page_size: page.page_size,
            total_count: page.total_count,
            items: page.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Order Change List Handler
///
/// Returns orders newest first with the customer's name.
#[endpoint(
    tags("admin"),
    summary = "Order Change List",
    responses(
        (status_code = StatusCode::OK, description = "One page of orders"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<OrderPageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let page = state
        .app
        .admin
        .order_changelist(page.into_inner().unwrap_or(1))
        .await
        .map_err(into_status_error)?;

    Ok(Json(page.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::{admin::AdminServiceError, orders::records::OrderId};

    use crate::test_helpers::MockServices;

    use super::*;

    fn make_service(mocks: MockServices) -> Service {
        mocks.into_service(Router::with_path("admin/orders").get(handler))
    }

    #[tokio::test]
    async fn test_changelist_returns_customer_names() -> TestResult {
        let mut mocks = MockServices::default();

        mocks
            .admin
            .expect_order_changelist()
            .once()
            .withf(|page| *page == 3)
            .return_once(|_| {
                Ok(Page {
                    items: vec![OrderChangeRow {
                        id: OrderId::from_i64(250),
                        placed_at: Timestamp::UNIX_EPOCH,
                        customer_first_name: "Ada".to_owned(),
                        customer_last_name: "Byron".to_owned(),
                    }],
                    page: 3,
                    page_size: 100,
                    total_count: 201,
                })
            });

        let mut res = TestClient::get("http://example.com/admin/orders?page=3")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: OrderPageResponse = res.take_json().await?;

        assert_eq!(body.items[0].id, 250);
        assert_eq!(body.items[0].customer_last_name, "Byron");
        assert_eq!(body.page_count, 3);

        Ok(())
    }

    #[tokio::test]
    async fn test_changelist_storage_error_returns_500() -> TestResult {
        let mut mocks = MockServices::default();

        mocks
            .admin
            .expect_order_changelist()
            .once()
            .return_once(|_| Err(AdminServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com/admin/orders")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
