//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use storefront_app::{
    auth::{MockAuthService, UserUuid},
    context::AppContext,
    domain::{
        categories::MockCategoriesService, customers::MockCustomersService,
        orders::MockOrdersService, products::MockProductsService,
    },
};

use crate::{errors, extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user_uuid(TEST_USER_UUID);
    ctrl.call_next(req, depot, res).await;
}

/// Services without expectations; any call fails the test.
fn strict_context() -> AppContext {
    AppContext {
        auth: Arc::new(MockAuthService::new()),
        customers: Arc::new(MockCustomersService::new()),
        categories: Arc::new(MockCategoriesService::new()),
        products: Arc::new(MockProductsService::new()),
        orders: Arc::new(MockOrdersService::new()),
    }
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    State::from_app_context(AppContext {
        auth: Arc::new(auth),
        ..strict_context()
    })
}

fn authenticated_service(app: AppContext, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(State::from_app_context(app)))
            .hoop(inject_user)
            .push(route),
    )
    .catcher(errors::catcher())
}

pub(crate) fn auth_service(auth: MockAuthService, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state_with_auth(auth))).push(route))
        .catcher(errors::catcher())
}

pub(crate) fn customers_service(customers: MockCustomersService, route: Router) -> Service {
    authenticated_service(
        AppContext {
            customers: Arc::new(customers),
            ..strict_context()
        },
        route,
    )
}

pub(crate) fn categories_service(categories: MockCategoriesService, route: Router) -> Service {
    authenticated_service(
        AppContext {
            categories: Arc::new(categories),
            ..strict_context()
        },
        route,
    )
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    authenticated_service(
        AppContext {
            products: Arc::new(products),
            ..strict_context()
        },
        route,
    )
}

/// Orders are placed on behalf of the caller's customer profile, so both are mocked.
pub(crate) fn orders_service(
    orders: MockOrdersService,
    customers: MockCustomersService,
    route: Router,
) -> Service {
    authenticated_service(
        AppContext {
            orders: Arc::new(orders),
            customers: Arc::new(customers),
            ..strict_context()
        },
        route,
    )
}
