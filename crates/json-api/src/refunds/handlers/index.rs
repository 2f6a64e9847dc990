//! Refund Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::refunds::records::RefundRecord;

use crate::{extensions::*, refunds::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RefundResponse {
    pub uuid: Uuid,
    pub purchase_uuid: Uuid,

    /// When the refund was requested
    pub created_at: String,
}

impl From<RefundRecord> for RefundResponse {
    fn from(refund: RefundRecord) -> Self {
        RefundResponse {
            uuid: refund.uuid.into(),
            purchase_uuid: refund.purchase_uuid.into(),
            created_at: refund.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RefundsResponse {
    /// Pending refunds, oldest first
    pub refunds: Vec<RefundResponse>,
}

/// Refund Index Handler
///
/// Lists refund requests awaiting review.
#[endpoint(
    tags("refunds"),
    summary = "List Pending Refunds",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<RefundsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    let refunds = state
        .app
        .refunds
        .list_refunds(caller)
        .await
        .map_err(into_status_error)?;

    Ok(Json(RefundsResponse {
        refunds: refunds.into_iter().map(Into::into).collect(),
    }))
}
