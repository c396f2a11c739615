//! Clear Inventory Action Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::{admin::records::ActionOutcome, products::records::ProductId};

use crate::{admin::errors::into_status_error, extensions::*, state::State};

/// Clear Inventory Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ClearInventoryRequest {
    /// Selected product IDs
    pub ids: Vec<i64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ActionOutcomeResponse {
    pub updated: u64,
    pub message: String,
}

impl From<ActionOutcome> for ActionOutcomeResponse {
    fn from(outcome: ActionOutcome) -> Self {
        ActionOutcomeResponse {
            updated: outcome.updated,
            message: outcome.message,
        }
    }
}

/// Clear Inventory Action Handler
///
/// Sets the inventory of the selected products to zero.
#[endpoint(
    tags("admin"),
    summary = "Clear Inventory",
    responses(
        (status_code = StatusCode::OK, description = "Inventory cleared"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ClearInventoryRequest>,
    depot: &mut Depot,
) -> Result<Json<ActionOutcomeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = json
        .into_inner()
        .ids
        .into_iter()
        .map(ProductId::from_i64)
        .collect();

    let outcome = state
        .app
        .admin
        .clear_inventory(products)
        .await
        .map_err(into_status_error)?;

    Ok(Json(outcome.into()))
}
