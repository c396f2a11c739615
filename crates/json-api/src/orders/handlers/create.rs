//! Place Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::{
    customers::records::CustomerId,
    orders::data::{NewOrder, NewOrderItem},
    products::records::ProductId,
};

use crate::{
    extensions::*,
    orders::{OrderResponse, errors::into_status_error},
    state::State,
};

/// Order Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemRequest {
    pub product_id: i64,
    pub quantity: u32,
}

/// Place Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PlaceOrderRequest {
    pub customer_id: i64,
    pub items: Vec<OrderItemRequest>,
}

impl From<PlaceOrderRequest> for NewOrder {
    fn from(request: PlaceOrderRequest) -> Self {
        NewOrder {
            customer: CustomerId::from_i64(request.customer_id),
            items: request
                .items
                .into_iter()
                .map(|item| NewOrderItem {
                    product: ProductId::from_i64(item.product_id),
                    quantity: item.quantity,
                })
                .collect(),
        }
    }
}

/// Place Order Handler
///
/// Stores the order and all of its items, or nothing.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<PlaceOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .orders
        .place_order(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    let id = order.order.id;

    res.add_header(LOCATION, format!("/orders/{id}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}
