//! Admin Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::admin::AdminServiceError;

pub(crate) fn into_status_error(error: AdminServiceError) -> StatusError {
    match error {
        AdminServiceError::AlreadyExists => StatusError::conflict(),
        AdminServiceError::InvalidReference
        | AdminServiceError::MissingRequiredData
        | AdminServiceError::InvalidData => StatusError::bad_request(),
        AdminServiceError::NotFound => StatusError::not_found(),
        AdminServiceError::DateRange(source) => {
            error!("could not resolve date filter: {source}");

            StatusError::internal_server_error()
        }
        AdminServiceError::Sql(source) => {
            error!("admin storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
