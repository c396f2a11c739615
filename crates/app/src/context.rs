//! App Context

use std::sync::Arc;

use sqlx::migrate::MigrateError;
use thiserror::Error;
use tracing::info;

use crate::{
    database::{self, Db},
    domain::{
        admin::{AdminService, SqliteAdminService},
        carts::{CartsService, SqliteCartsService},
        collections::{CollectionsService, SqliteCollectionsService},
        customers::{CustomersService, SqliteCustomersService},
        orders::{OrdersService, SqliteOrdersService},
        products::{ProductsService, SqliteProductsService},
        reports::{ReportsService, SqliteReportsService},
        tags::{SqliteTagsService, TagsService, TagsServiceError},
        users::{SqliteUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply migrations")]
    Migrate(#[source] MigrateError),

    #[error("failed to register content types")]
    ContentTypes(#[source] TagsServiceError),
}

#[derive(Clone)]
pub struct AppContext {
    pub collections: Arc<dyn CollectionsService>,
    pub products: Arc<dyn ProductsService>,
    pub customers: Arc<dyn CustomersService>,
    pub orders: Arc<dyn OrdersService>,
    pub carts: Arc<dyn CartsService>,
    pub tags: Arc<dyn TagsService>,
    pub users: Arc<dyn UsersService>,
    pub reports: Arc<dyn ReportsService>,
    pub admin: Arc<dyn AdminService>,
}

impl AppContext {
    /// Wire every service to one database.
    #[must_use]
    pub fn from_db(db: &Db) -> Self {
        Self {
            collections: Arc::new(SqliteCollectionsService::new(db.clone())),
            products: Arc::new(SqliteProductsService::new(db.clone())),
            customers: Arc::new(SqliteCustomersService::new(db.clone())),
            orders: Arc::new(SqliteOrdersService::new(db.clone())),
            carts: Arc::new(SqliteCartsService::new(db.clone())),
            tags: Arc::new(SqliteTagsService::new(db.clone())),
            users: Arc::new(SqliteUsersService::new(db.clone())),
            reports: Arc::new(SqliteReportsService::new(db.clone())),
            admin: Arc::new(SqliteAdminService::new(db.clone())),
        }
    }

    /// Build application context from a database URL.
    ///
    /// Pending migrations are applied and every content type is registered, so generic
    /// associations work against a fresh database.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting, migrating or registering content types fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrate)?;

        let context = Self::from_db(&Db::new(pool));

        let registered = context
            .tags
            .register_all_content_types()
            .await
            .map_err(AppInitError::ContentTypes)?;

        info!(content_types = registered.len(), "storefront context ready");

        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{domain::tags::ContentType, test::db::TestDb};

    use super::*;

    #[tokio::test]
    async fn from_database_url_migrates_and_registers_content_types() -> TestResult {
        let test_db = TestDb::new().await;

        let context = AppContext::from_database_url(&test_db.url).await?;

        let registered = context.tags.register_all_content_types().await?;

        assert_eq!(registered.len(), ContentType::ALL.len());

        let collections = context.collections.list_collections().await?;

        assert!(collections.is_empty());

        Ok(())
    }
}
