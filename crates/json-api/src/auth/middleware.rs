//! Auth middleware.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::error;

use storefront_app::domain::accounts::{AccountsServiceError, records::Caller};

use crate::{extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid Authorization header"));
        ctrl.skip_rest();

        return;
    };

    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => state,
        Err(status) => {
            res.render(status);
            ctrl.skip_rest();

            return;
        }
    };

    let account = match state.app.accounts.authenticate(token).await {
        Ok(account) => account,
        Err(AccountsServiceError::NotFound) => {
            res.render(StatusError::unauthorized().brief("Invalid API token"));
            ctrl.skip_rest();

            return;
        }
        Err(source) => {
            error!("failed to authenticate api token: {source}");

            res.render(StatusError::internal_server_error());
            ctrl.skip_rest();

            return;
        }
    };

    depot.insert_caller(Caller::from(&account));

    ctrl.call_next(req, depot, res).await;
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use storefront_app::domain::accounts::{MockAccountsService, records::AccountRecord};

    use crate::test_helpers::{TEST_ACCOUNT_UUID, TestState, make_account};

    use super::*;

    #[salvo::handler]
    async fn echo_caller(depot: &mut Depot, res: &mut Response) {
        let caller = depot.caller_or_401().ok().map_or_else(
            || "missing".to_string(),
            |caller| format!("{}:{}", caller.account, caller.is_staff()),
        );

        res.render(caller);
    }

    fn make_service(accounts: MockAccountsService) -> Service {
        let state = TestState::new().with_accounts(accounts).into_state();

        let router = Router::new()
            .hoop(inject(state))
            .hoop(handler)
            .push(Router::new().get(echo_caller));

        Service::new(router)
    }

    #[tokio::test]
    async fn test_missing_authorization_header_returns_401() -> TestResult {
        let mut accounts = MockAccountsService::new();

        accounts.expect_authenticate().never();

        let res = TestClient::get("http://example.com")
            .send(&make_service(accounts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_non_bearer_authorization_header_returns_401() -> TestResult {
        let mut accounts = MockAccountsService::new();

        accounts.expect_authenticate().never();

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Basic abc123", true)
            .send(&make_service(accounts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_token_returns_401() -> TestResult {
        let mut accounts = MockAccountsService::new();

        accounts
            .expect_authenticate()
            .once()
            .withf(|token| token == "abc123")
            .return_once(|_| Err(AccountsServiceError::NotFound));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&make_service(accounts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_storage_failure_returns_500() -> TestResult {
        let mut accounts = MockAccountsService::new();

        accounts
            .expect_authenticate()
            .once()
            .return_once(|_| Err(AccountsServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&make_service(accounts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }

    #[tokio::test]
    async fn test_valid_token_injects_caller() -> TestResult {
        let account = AccountRecord {
            staff: true,
            ..make_account(TEST_ACCOUNT_UUID)
        };

        let mut accounts = MockAccountsService::new();

        accounts
            .expect_authenticate()
            .once()
            .withf(|token| token == "abc123")
            .return_once(move |_| Ok(account));

        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "bearer  abc123 ", true)
            .send(&make_service(accounts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, format!("{TEST_ACCOUNT_UUID}:true"));

        Ok(())
    }
}
