//! Accounts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::{to_signed, try_get_unsigned},
    domain::accounts::{
        data::NewAccount,
        records::{AccountRecord, AccountUuid},
    },
};

const CREATE_ACCOUNT_SQL: &str = include_str!("sql/create_account.sql");
const GET_ACCOUNT_SQL: &str = include_str!("sql/get_account.sql");
const LOCK_ACCOUNT_SQL: &str = include_str!("sql/lock_account.sql");
const FIND_ACCOUNT_BY_TOKEN_HASH_SQL: &str = include_str!("sql/find_account_by_token_hash.sql");
const SET_STAFF_SQL: &str = include_str!("sql/set_staff.sql");
const DEBIT_WALLET_SQL: &str = include_str!("sql/debit_wallet.sql");
const CREDIT_WALLET_SQL: &str = include_str!("sql/credit_wallet.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAccountsRepository;

impl PgAccountsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_account(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: NewAccount,
        wallet: u64,
    ) -> Result<AccountRecord, sqlx::Error> {
        query_as::<Postgres, AccountRecord>(CREATE_ACCOUNT_SQL)
            .bind(account.uuid.into_uuid())
            .bind(account.username)
            .bind(account.token_hash)
            .bind(to_signed("wallet", wallet)?)
            .bind(account.staff)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_account(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
    ) -> Result<AccountRecord, sqlx::Error> {
        query_as::<Postgres, AccountRecord>(GET_ACCOUNT_SQL)
            .bind(account.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch an account and hold its row lock until the transaction ends.
    pub(crate) async fn lock_account(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
    ) -> Result<AccountRecord, sqlx::Error> {
        query_as::<Postgres, AccountRecord>(LOCK_ACCOUNT_SQL)
            .bind(account.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_account_by_token_hash(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        token_hash: &str,
    ) -> Result<Option<AccountRecord>, sqlx::Error> {
        query_as::<Postgres, AccountRecord>(FIND_ACCOUNT_BY_TOKEN_HASH_SQL)
            .bind(token_hash)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn set_staff(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        username: &str,
        staff: bool,
    ) -> Result<AccountRecord, sqlx::Error> {
        query_as::<Postgres, AccountRecord>(SET_STAFF_SQL)
            .bind(username)
            .bind(staff)
            .fetch_one(&mut **tx)
            .await
    }

    /// Debit the wallet. Returns the number of rows changed, which is zero
    /// when the balance would go negative.
    pub(crate) async fn debit_wallet(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
        amount: u64,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DEBIT_WALLET_SQL)
            .bind(account.into_uuid())
            .bind(to_signed("wallet", amount)?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn credit_wallet(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
        amount: u64,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CREDIT_WALLET_SQL)
            .bind(account.into_uuid())
            .bind(to_signed("wallet", amount)?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for AccountRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: AccountUuid::from_uuid(row.try_get("uuid")?),
            username: row.try_get("username")?,
            wallet: try_get_unsigned(row, "wallet")?,
            staff: row.try_get("staff")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
