//! App Router

use std::sync::Arc;

use salvo::{
    affix_state::inject,
    catch_panic::CatchPanic,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};

use crate::{
    auth, categories, customers, healthcheck,
    hosts::AllowedHosts,
    observability::{metrics_handler, request_logging},
    orders, products,
    state::State,
};

/// Every route, with the shared hoops in front.
pub(crate) fn app_router(state: Arc<State>, hosts: AllowedHosts) -> Router {
    Router::new()
        .hoop(CatchPanic::new())
        .hoop(request_logging)
        .hoop(hosts)
        .hoop(remove_slash().redirect_code(StatusCode::PERMANENT_REDIRECT))
        .hoop(inject(state))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(auth_router())
        .push(api_router())
}

/// Login and token endpoints; open to anonymous callers.
fn auth_router() -> Router {
    Router::with_path("auth")
        .push(
            Router::with_path("token")
                .post(auth::token::handler)
                .push(Router::with_path("refresh").post(auth::refresh::handler)),
        )
        .push(
            Router::with_path("oidc")
                .post(auth::oidc::handler)
                .push(Router::with_path("config").get(auth::oidc_config::handler))
                .push(Router::with_path("callback").post(auth::oidc_callback::handler)),
        )
}

/// Resource endpoints behind bearer authentication.
fn api_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("customers")
                .get(customers::index::handler)
                .post(customers::create::handler)
                .push(
                    Router::with_path("{customer}")
                        .get(customers::get::handler)
                        .put(customers::update::handler),
                ),
        )
        .push(
            Router::with_path("categories")
                .get(categories::index::handler)
                .post(categories::create::handler)
                .push(Router::with_path("all").get(categories::all::handler))
                .push(
                    Router::with_path("{category}")
                        .get(categories::get::handler)
                        .put(categories::update::handler)
                        .delete(categories::delete::handler)
                        .push(
                            Router::with_path("average-price")
                                .get(categories::average_price::handler),
                        ),
                ),
        )
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .post(products::create::handler)
                .push(Router::with_path("bulk-upload").post(products::bulk_upload::handler))
                .push(
                    Router::with_path("{product}")
                        .get(products::get::handler)
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .post(orders::create::handler)
                .push(
                    Router::with_path("{order}")
                        .get(orders::get::handler)
                        .put(orders::update::handler),
                ),
        )
}

/// Mount the OpenAPI document and Swagger UI.
pub(crate) fn with_docs(router: Router) -> Router {
    let doc = OpenApi::new("Storefront API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"))
}
