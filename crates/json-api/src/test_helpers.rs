//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};

use storefront_app::{
    context::AppContext,
    domain::{
        admin::MockAdminService, carts::MockCartsService, collections::MockCollectionsService,
        customers::MockCustomersService, orders::MockOrdersService,
        products::MockProductsService, reports::MockReportsService, tags::MockTagsService,
        users::MockUsersService,
    },
};

use crate::state::State;

/// One mock per service; any call without a matching expectation fails the test.
#[derive(Default)]
pub(crate) struct MockServices {
    pub(crate) collections: MockCollectionsService,
    pub(crate) products: MockProductsService,
    pub(crate) customers: MockCustomersService,
    pub(crate) orders: MockOrdersService,
    pub(crate) carts: MockCartsService,
    pub(crate) tags: MockTagsService,
    pub(crate) users: MockUsersService,
    pub(crate) reports: MockReportsService,
    pub(crate) admin: MockAdminService,
}

impl MockServices {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            collections: Arc::new(self.collections),
            products: Arc::new(self.products),
            customers: Arc::new(self.customers),
            orders: Arc::new(self.orders),
            carts: Arc::new(self.carts),
            tags: Arc::new(self.tags),
            users: Arc::new(self.users),
            reports: Arc::new(self.reports),
            admin: Arc::new(self.admin),
        })
    }

    pub(crate) fn into_service(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.into_state())).push(route))
    }
}
