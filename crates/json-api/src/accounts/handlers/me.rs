//! Current Account Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::accounts::records::AccountRecord;

use crate::{accounts::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AccountResponse {
    pub uuid: Uuid,
    pub username: String,

    /// Wallet balance in pence/cents
    pub wallet: u64,

    pub staff: bool,
    pub created_at: String,
}

impl From<AccountRecord> for AccountResponse {
    fn from(account: AccountRecord) -> Self {
        AccountResponse {
            uuid: account.uuid.into(),
            username: account.username,
            wallet: account.wallet,
            staff: account.staff,
            created_at: account.created_at.to_string(),
        }
    }
}

/// Current Account Handler
///
/// Returns the authenticated account and its wallet balance.
#[endpoint(
    tags("accounts"),
    summary = "Current Account",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<AccountResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    let account = state
        .app
        .accounts
        .get_account(caller.account)
        .await
        .map_err(into_status_error)?;

    Ok(Json(account.into()))
}
