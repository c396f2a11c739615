//! Tag Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::tags::TagsServiceError;

pub(crate) fn into_status_error(error: TagsServiceError) -> StatusError {
    match error {
        TagsServiceError::AlreadyExists => StatusError::conflict().brief("Already tagged"),
        TagsServiceError::InvalidReference
        | TagsServiceError::MissingRequiredData
        | TagsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid tag request")
        }
        TagsServiceError::NotFound => {
            StatusError::not_found().brief("Content type is not registered")
        }
        TagsServiceError::Sql(source) => {
            error!("tag storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
