//! Test context for service-level integration tests.

use crate::{
    database::Db,
    domain::{
        admin::SqliteAdminService,
        carts::SqliteCartsService,
        collections::SqliteCollectionsService,
        customers::SqliteCustomersService,
        orders::SqliteOrdersService,
        products::SqliteProductsService,
        reports::SqliteReportsService,
        tags::SqliteTagsService,
        users::SqliteUsersService,
    },
};

use super::db::TestDb;

/// Every service wired to one isolated database.
///
/// Content types start unregistered; tagging tests register the ones they need.
pub struct TestContext {
    pub db: TestDb,
    pub collections: SqliteCollectionsService,
    pub products: SqliteProductsService,
    pub customers: SqliteCustomersService,
    pub orders: SqliteOrdersService,
    pub carts: SqliteCartsService,
    pub tags: SqliteTagsService,
    pub users: SqliteUsersService,
    pub reports: SqliteReportsService,
    pub admin: SqliteAdminService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        Self {
            collections: SqliteCollectionsService::new(db.clone()),
            products: SqliteProductsService::new(db.clone()),
            customers: SqliteCustomersService::new(db.clone()),
            orders: SqliteOrdersService::new(db.clone()),
            carts: SqliteCartsService::new(db.clone()),
            users: SqliteUsersService::new(db.clone()),
            reports: SqliteReportsService::new(db.clone()),
            tags: SqliteTagsService::new(db.clone()),
            admin: SqliteAdminService::new(db),
            db: test_db,
        }
    }
}
