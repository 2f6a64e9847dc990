//! Shared refund resolution flow for the approve and reject handlers.

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::refunds::data::RefundDecision;

use crate::{extensions::*, refunds::errors::into_status_error, state::State};

/// Resolved Refund Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RefundResolvedResponse {
    pub uuid: Uuid,

    /// `approved` or `rejected`
    pub status: String,
}

pub(super) async fn resolve(
    refund: Uuid,
    decision: RefundDecision,
    depot: &Depot,
) -> Result<Json<RefundResolvedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    tracing::Span::current().record("account_uuid", tracing::field::display(caller.account));

    state
        .app
        .refunds
        .resolve_refund(caller, refund.into(), decision)
        .await
        .map_err(into_status_error)?;

    let status = match decision {
        RefundDecision::Approve => "approved",
        RefundDecision::Reject => "rejected",
    };

    Ok(Json(RefundResolvedResponse {
        uuid: refund,
        status: status.to_string(),
    }))
}
