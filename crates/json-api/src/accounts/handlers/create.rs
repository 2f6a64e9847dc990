//! Register Account Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::{
    auth::issue_api_token,
    domain::accounts::{data::NewAccount, records::AccountUuid},
};

use crate::{accounts::errors::into_status_error, extensions::*, state::State};

/// Register Account Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterAccountRequest {
    pub username: String,
}

/// Account Registered Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AccountRegisteredResponse {
    /// The new account's identifier
    pub uuid: Uuid,

    pub username: String,

    /// Starting wallet balance in pence/cents
    pub wallet: u64,

    pub staff: bool,

    /// Bearer token for subsequent requests. It is not shown again.
    pub token: String,
}

/// Register Account Handler
#[endpoint(
    tags("accounts"),
    summary = "Register Account",
    responses(
        (status_code = StatusCode::CREATED, description = "Account registered"),
        (status_code = StatusCode::CONFLICT, description = "Username is already taken"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "accounts.create",
    skip(json, depot, res),
    fields(account_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterAccountRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AccountRegisteredResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let uuid = AccountUuid::new();
    let issued = issue_api_token(uuid);

    tracing::Span::current().record("account_uuid", tracing::field::display(uuid));

    let account = state
        .app
        .accounts
        .register(NewAccount {
            uuid,
            username: json.into_inner().username,
            token_hash: issued.token_hash,
            staff: false,
        })
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(AccountRegisteredResponse {
        uuid: account.uuid.into(),
        username: account.username,
        wallet: account.wallet,
        staff: account.staff,
        token: issued.token,
    }))
}
