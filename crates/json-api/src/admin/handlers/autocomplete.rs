//! Autocomplete Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{PathParam, QueryParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::admin::records::AutocompleteOption;

use crate::{admin::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AutocompleteResult {
    pub id: i64,
    pub text: String,
}

impl From<AutocompleteOption> for AutocompleteResult {
    fn from(option: AutocompleteOption) -> Self {
        AutocompleteResult {
            id: option.id,
            text: option.text,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AutocompleteResponse {
    pub results: Vec<AutocompleteResult>,
}

/// Autocomplete Handler
///
/// Looks up collections, products or customers whose display text contains `term`.
#[endpoint(
    tags("admin"),
    summary = "Autocomplete",
    responses(
        (status_code = StatusCode::OK, description = "Up to twenty matches"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown lookup target"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    target: PathParam<String>,
    term: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<AutocompleteResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let term = term.into_inner().unwrap_or_default();
    let admin = &state.app.admin;

    let options = match target.into_inner().as_str() {
        "collections" => admin.autocomplete_collections(term).await,
        "products" => admin.autocomplete_products(term).await,
        "customers" => admin.autocomplete_customers(term).await,
        _ => return Err(StatusError::not_found().brief("Unknown lookup target")),
    }
    .map_err(into_status_error)?;

    Ok(Json(AutocompleteResponse {
        results: options.into_iter().map(Into::into).collect(),
    }))
}
