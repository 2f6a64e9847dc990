//! Purchase Product Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::purchases::data::NewPurchase;

use crate::{
    extensions::*,
    purchases::{errors::into_status_error, index::PurchaseResponse},
    state::State,
};

/// Purchase Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PurchaseRequest {
    pub uuid: Uuid,
    pub quantity: u64,
}

/// Purchase Product Handler
///
/// Debits the caller's wallet and takes the units out of stock.
#[endpoint(
    tags("purchases"),
    summary = "Purchase Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Purchase recorded"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Not enough stock or funds"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "purchases.create",
    skip(product, json, depot, res),
    fields(
        account_uuid = tracing::field::Empty,
        product_uuid = tracing::field::Empty,
        purchase_uuid = tracing::field::Empty,
        quantity = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<PurchaseRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PurchaseResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;
    let request = json.into_inner();
    let product = product.into_inner();

    let span = tracing::Span::current();

    span.record("account_uuid", tracing::field::display(caller.account));
    span.record("product_uuid", tracing::field::display(product));
    span.record("purchase_uuid", tracing::field::display(request.uuid));
    span.record("quantity", request.quantity);

    let purchase = state
        .app
        .purchases
        .purchase(
            caller,
            NewPurchase {
                uuid: request.uuid.into(),
                product_uuid: product.into(),
                quantity: request.quantity,
                purchased_at: Timestamp::now(),
            },
        )
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(purchase.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::{
        products::records::ProductUuid,
        purchases::{MockPurchasesService, PurchasesServiceError, records::PurchaseUuid},
    };

    use crate::test_helpers::{
        TEST_CUSTOMER, TestState, customer_service, make_purchase, public_service,
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("products/{product}/purchases").post(handler)
    }

    fn rejecting(error: fn() -> PurchasesServiceError) -> MockPurchasesService {
        let mut purchases = MockPurchasesService::new();

        purchases
            .expect_purchase()
            .once()
            .returning(move |_, _| Err(error()));

        purchases
    }

    async fn send(purchases: MockPurchasesService, quantity: u64) -> salvo::Response {
        let product = ProductUuid::new();

        TestClient::post(format!("http://example.com/products/{product}/purchases"))
            .json(&json!({ "uuid": PurchaseUuid::new().into_uuid(), "quantity": quantity }))
            .send(&customer_service(
                TestState::new().with_purchases(purchases),
                route(),
            ))
            .await
    }

    #[tokio::test]
    async fn test_purchase_success_returns_201() -> TestResult {
        let product = ProductUuid::new();
        let uuid = PurchaseUuid::new();
        let before = Timestamp::now();

        let mut purchases = MockPurchasesService::new();

        purchases
            .expect_purchase()
            .once()
            .withf(move |caller, new| {
                *caller == TEST_CUSTOMER
                    && new.uuid == uuid
                    && new.product_uuid == product
                    && new.quantity == 3
                    && new.purchased_at >= before
            })
            .return_once(move |_, _| Ok(make_purchase(uuid, product)));

        let mut res = TestClient::post(format!("http://example.com/products/{product}/purchases"))
            .json(&json!({ "uuid": uuid.into_uuid(), "quantity": 3 }))
            .send(&customer_service(
                TestState::new().with_purchases(purchases),
                route(),
            ))
            .await;

        let body: PurchaseResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.uuid, uuid.into_uuid());
        assert_eq!(body.product_uuid, product.into_uuid());
        assert_eq!(body.quantity, 3);
        assert_eq!(body.unit_price, 10);
        assert_eq!(body.total, 30);

        Ok(())
    }

    #[tokio::test]
    async fn test_purchase_insufficient_stock_returns_409() {
        let res = send(rejecting(|| PurchasesServiceError::InsufficientStock), 6).await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
    }

    #[tokio::test]
    async fn test_purchase_insufficient_funds_returns_409() {
        let res = send(rejecting(|| PurchasesServiceError::InsufficientFunds), 3).await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
    }

    #[tokio::test]
    async fn test_purchase_zero_quantity_returns_400() {
        let res = send(rejecting(|| PurchasesServiceError::InvalidQuantity), 0).await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_purchase_unknown_product_returns_404() {
        let res = send(rejecting(|| PurchasesServiceError::NotFound), 1).await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_purchase_without_caller_returns_401() {
        let product = ProductUuid::new();

        let res = TestClient::post(format!("http://example.com/products/{product}/purchases"))
            .json(&json!({ "uuid": PurchaseUuid::new().into_uuid(), "quantity": 1 }))
            .send(&public_service(TestState::new(), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
    }
}
