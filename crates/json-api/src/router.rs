//! App Router

use salvo::Router;

use crate::{accounts, auth, healthcheck, observability, products, purchases, refunds};

/// Routes reachable without a bearer token.
fn public_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(Router::with_path("accounts").post(accounts::create::handler))
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
}

/// Routes that resolve a caller from the bearer token first.
fn authenticated_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(Router::with_path("accounts/me").get(accounts::me::handler))
        .push(
            Router::with_path("products")
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .put(products::update::handler)
                        .delete(products::delete::handler)
                        .push(Router::with_path("purchases").post(purchases::create::handler)),
                ),
        )
        .push(
            Router::with_path("purchases")
                .get(purchases::index::handler)
                .push(Router::with_path("{purchase}/refund").post(refunds::create::handler)),
        )
        .push(
            Router::with_path("refunds")
                .get(refunds::index::handler)
                .push(
                    Router::with_path("{refund}")
                        .push(Router::with_path("approve").post(refunds::approve::handler))
                        .push(Router::with_path("reject").post(refunds::reject::handler)),
                ),
        )
}

pub fn app_router() -> Router {
    Router::new()
        .push(public_router())
        .push(authenticated_router())
}
