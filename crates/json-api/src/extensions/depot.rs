//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};
use tracing::error;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>().map_err(|_missing| {
            error!("{} missing from depot", std::any::type_name::<T>());

            StatusError::internal_server_error()
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::{prelude::*, test::TestClient};
    use testresult::TestResult;

    use crate::state::State;

    use super::*;

    #[salvo::handler]
    async fn needs_state(depot: &mut Depot) -> Result<&'static str, StatusError> {
        depot.obtain_or_500::<Arc<State>>()?;

        Ok("ok")
    }

    #[tokio::test]
    async fn missing_state_returns_500() -> TestResult {
        let router = Router::with_path("state").get(needs_state);

        let res = TestClient::get("http://example.com/state")
            .send(&Service::new(router))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
