//! Reject Refund Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use storefront_app::domain::refunds::data::RefundDecision;

use super::resolve::{RefundResolvedResponse, resolve};

/// Reject Refund Handler
///
/// Drops the request. The purchase stays and records when it was rejected.
#[endpoint(
    tags("refunds"),
    summary = "Reject Refund",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Refund rejected"),
        (status_code = StatusCode::NOT_FOUND, description = "Refund not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::FORBIDDEN, description = "Staff only"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "refunds.reject",
    skip(refund, depot),
    fields(account_uuid = tracing::field::Empty, refund_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    refund: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<RefundResolvedResponse>, StatusError> {
    let refund = refund.into_inner();

    tracing::Span::current().record("refund_uuid", tracing::field::display(refund));

    resolve(refund, RefundDecision::Reject, depot).await
}
