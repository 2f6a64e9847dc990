//! Accounts service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::{hash_api_token, parse_api_token},
    database::Db,
    domain::accounts::{
        data::NewAccount,
        errors::AccountsServiceError,
        records::{AccountRecord, AccountUuid},
        repository::PgAccountsRepository,
    },
};

/// Starting wallet balance for new accounts: 10,000.00 in minor units.
pub const DEFAULT_WALLET: u64 = 1_000_000;

#[derive(Debug, Clone)]
pub struct PgAccountsService {
    db: Db,
    repository: PgAccountsRepository,
    default_wallet: u64,
}

impl PgAccountsService {
    #[must_use]
    pub fn new(db: Db, default_wallet: u64) -> Self {
        Self {
            db,
            repository: PgAccountsRepository::new(),
            default_wallet,
        }
    }
}

#[async_trait]
impl AccountsService for PgAccountsService {
    async fn register(&self, account: NewAccount) -> Result<AccountRecord, AccountsServiceError> {
        if !account.has_valid_username() {
            return Err(AccountsServiceError::InvalidData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_account(&mut tx, account, self.default_wallet)
            .await?;

        tx.commit().await?;

        info!(
            account_uuid = %created.uuid,
            username = %created.username,
            staff = created.staff,
            "registered account"
        );

        Ok(created)
    }

    async fn get_account(
        &self,
        account: AccountUuid,
    ) -> Result<AccountRecord, AccountsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let account = self.repository.get_account(&mut tx, account).await?;

        tx.commit().await?;

        Ok(account)
    }

    async fn authenticate(&self, bearer_token: &str) -> Result<AccountRecord, AccountsServiceError> {
        let parsed = parse_api_token(bearer_token).map_err(|_ignored| AccountsServiceError::NotFound)?;

        let mut tx = self.db.begin_transaction().await?;

        let account = self
            .repository
            .find_account_by_token_hash(&mut tx, &hash_api_token(bearer_token))
            .await?
            .ok_or(AccountsServiceError::NotFound)?;

        tx.commit().await?;

        if account.uuid != parsed.account_uuid {
            return Err(AccountsServiceError::NotFound);
        }

        Ok(account)
    }

    async fn set_staff(
        &self,
        username: &str,
        staff: bool,
    ) -> Result<AccountRecord, AccountsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let updated = self.repository.set_staff(&mut tx, username, staff).await?;

        tx.commit().await?;

        info!(account_uuid = %updated.uuid, staff, "changed staff capability");

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait AccountsService: Send + Sync {
    /// Creates a customer account with the default wallet balance.
    async fn register(&self, account: NewAccount) -> Result<AccountRecord, AccountsServiceError>;

    /// Retrieve a single account.
    async fn get_account(&self, account: AccountUuid)
    -> Result<AccountRecord, AccountsServiceError>;

    /// Resolve a bearer token to the account it was issued for.
    async fn authenticate(&self, bearer_token: &str) -> Result<AccountRecord, AccountsServiceError>;

    /// Grant or revoke the staff capability.
    async fn set_staff(
        &self,
        username: &str,
        staff: bool,
    ) -> Result<AccountRecord, AccountsServiceError>;
}
