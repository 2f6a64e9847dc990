//! Purchase Index Handler

use std::{string::ToString, sync::Arc};

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::purchases::records::PurchaseRecord;

use crate::{extensions::*, purchases::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PurchaseResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub quantity: u64,

    /// Product price when the purchase was made, in pence/cents
    pub unit_price: u64,

    /// Amount debited from the wallet, in pence/cents
    pub total: u64,

    pub created_at: String,

    /// Set when a refund request for this purchase was last rejected
    pub refund_rejected_at: Option<String>,
}

impl From<PurchaseRecord> for PurchaseResponse {
    fn from(purchase: PurchaseRecord) -> Self {
        PurchaseResponse {
            uuid: purchase.uuid.into(),
            product_uuid: purchase.product_uuid.into(),
            quantity: purchase.quantity,
            unit_price: purchase.unit_price,
            total: purchase.total,
            created_at: purchase.created_at.to_string(),
            refund_rejected_at: purchase.refund_rejected_at.as_ref().map(ToString::to_string),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PurchasesResponse {
    /// The caller's purchases, newest first
    pub purchases: Vec<PurchaseResponse>,
}

/// Purchase Index Handler
#[endpoint(
    tags("purchases"),
    summary = "List Purchases",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<PurchasesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    let purchases = state
        .app
        .purchases
        .list_purchases(caller)
        .await
        .map_err(into_status_error)?;

    Ok(Json(PurchasesResponse {
        purchases: purchases.into_iter().map(Into::into).collect(),
    }))
}
