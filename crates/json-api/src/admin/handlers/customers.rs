//! Customer Change List Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::{admin::records::Page, customers::records::CustomerRecord};

use crate::{admin::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerRowResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,

    /// Membership code: `B`, `S` or `G`
    pub membership: String,
}

impl From<CustomerRecord> for CustomerRowResponse {
    fn from(customer: CustomerRecord) -> Self {
        CustomerRowResponse {
            id: customer.id.into_i64(),
            first_name: customer.first_name,
            last_name: customer.last_name,
            email: customer.email,
            phone: customer.phone,
            membership: customer.membership.code().to_owned(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerPageResponse {
    pub items: Vec<CustomerRowResponse>,
    pub page: u32,
    pub page_size: u32,
    pub page_count: u64,
    pub total_count: u64,
}

impl From<Page<CustomerRecord>> for CustomerPageResponse {
    fn from(page: Page<CustomerRecord>) -> Self {
        CustomerPageResponse {
            page_count: page.page_count(),
            page: page.page,
            page_size: page.page_size,
            total_count: page.total_count,
            items: page.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Customer Change List Handler
///
/// Returns customers by name; `q` matches the start of first or last names.
#[endpoint(
    tags("admin"),
    summary = "Customer Change List",
    responses(
        (status_code = StatusCode::OK, description = "One page of customers"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    q: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<CustomerPageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let page = state
        .app
        .admin
        .customer_changelist(q.into_inner(), page.into_inner().unwrap_or(1))
        .await
        .map_err(into_status_error)?;

    Ok(Json(page.into()))
}
