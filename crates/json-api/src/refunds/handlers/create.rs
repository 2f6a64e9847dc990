//! Request Refund Handler

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

use storefront_app::domain::refunds::data::NewRefund;

use crate::{
    extensions::*,
    refunds::{errors::into_status_error, index::RefundResponse},
    state::State,
};

/// Refund Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RefundRequest {
    pub uuid: Uuid,
}

/// Request Refund Handler
///
/// Asks staff to refund one of the caller's purchases.
#[endpoint(
    tags("refunds"),
    summary = "Request Refund",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Refund requested"),
        (status_code = StatusCode::NOT_FOUND, description = "Purchase not found"),
        (status_code = StatusCode::CONFLICT, description = "Refund already requested"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Refund window has expired"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "refunds.create",
    skip(purchase, json, depot, res),
    fields(
        account_uuid = tracing::field::Empty,
        purchase_uuid = tracing::field::Empty,
        refund_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    purchase: PathParam<Uuid>,
    json: JsonBody<RefundRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<RefundResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;
    let request = json.into_inner();
    let purchase = purchase.into_inner();

    let span = tracing::Span::current();

    span.record("account_uuid", tracing::field::display(caller.account));
    span.record("purchase_uuid", tracing::field::display(purchase));
    span.record("refund_uuid", tracing::field::display(request.uuid));

    let refund = state
        .app
        .refunds
        .request_refund(
            caller,
            NewRefund {
                uuid: request.uuid.into(),
                purchase_uuid: purchase.into(),
                requested_at: Timestamp::now(),
            },
        )
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(refund.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::{
        purchases::records::PurchaseUuid,
        refunds::{MockRefundsService, RefundsServiceError, records::RefundUuid},
    };

    use crate::test_helpers::{TEST_CUSTOMER, TestState, customer_service, make_refund};

    use super::*;

    fn make_service(refunds: MockRefundsService) -> Service {
        customer_service(
            TestState::new().with_refunds(refunds),
            Router::with_path("purchases/{purchase}/refund").post(handler),
        )
    }

    async fn send_rejected(error: RefundsServiceError) -> salvo::Response {
        let mut refunds = MockRefundsService::new();

        refunds
            .expect_request_refund()
            .once()
            .return_once(move |_, _| Err(error));

        TestClient::post(format!(
            "http://example.com/purchases/{}/refund",
            PurchaseUuid::new()
        ))
        .json(&json!({ "uuid": RefundUuid::new().into_uuid() }))
        .send(&make_service(refunds))
        .await
    }

    #[tokio::test]
    async fn test_request_refund_success_returns_201() -> TestResult {
        let purchase = PurchaseUuid::new();
        let uuid = RefundUuid::new();
        let before = Timestamp::now();

        let mut refunds = MockRefundsService::new();

        refunds
            .expect_request_refund()
            .once()
            .withf(move |caller, new| {
                *caller == TEST_CUSTOMER
                    && new.uuid == uuid
                    && new.purchase_uuid == purchase
                    && new.requested_at >= before
            })
            .return_once(move |_, _| Ok(make_refund(uuid, purchase)));

        let mut res = TestClient::post(format!("http://example.com/purchases/{purchase}/refund"))
            .json(&json!({ "uuid": uuid.into_uuid() }))
            .send(&make_service(refunds))
            .await;

        let body: RefundResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.uuid, uuid.into_uuid());
        assert_eq!(body.purchase_uuid, purchase.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_request_refund_after_window_returns_422() {
        let res = send_rejected(RefundsServiceError::WindowExpired).await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));
    }

    #[tokio::test]
    async fn test_request_refund_twice_returns_409() {
        let res = send_rejected(RefundsServiceError::DuplicateRefund).await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
    }

    #[tokio::test]
    async fn test_request_refund_for_unknown_purchase_returns_404() {
        let res = send_rejected(RefundsServiceError::NotFound).await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
