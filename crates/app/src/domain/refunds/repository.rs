//! Refunds Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    purchases::records::PurchaseUuid,
    refunds::{
        data::NewRefund,
        records::{RefundRecord, RefundUuid},
    },
};

const CREATE_REFUND_SQL: &str = include_str!("sql/create_refund.sql");
const FIND_REFUND_BY_PURCHASE_SQL: &str = include_str!("sql/find_refund_by_purchase.sql");
const LOCK_REFUND_SQL: &str = include_str!("sql/lock_refund.sql");
const DELETE_REFUND_SQL: &str = include_str!("sql/delete_refund.sql");
const LIST_REFUNDS_SQL: &str = include_str!("sql/list_refunds.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgRefundsRepository;

impl PgRefundsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_refund(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        refund: NewRefund,
    ) -> Result<RefundRecord, sqlx::Error> {
        query_as::<Postgres, RefundRecord>(CREATE_REFUND_SQL)
            .bind(refund.uuid.into_uuid())
            .bind(refund.purchase_uuid.into_uuid())
            .bind(SqlxTimestamp::from(refund.requested_at))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_refund_by_purchase(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        purchase: PurchaseUuid,
    ) -> Result<Option<RefundRecord>, sqlx::Error> {
        query_as::<Postgres, RefundRecord>(FIND_REFUND_BY_PURCHASE_SQL)
            .bind(purchase.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn lock_refund(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        refund: RefundUuid,
    ) -> Result<RefundRecord, sqlx::Error> {
        query_as::<Postgres, RefundRecord>(LOCK_REFUND_SQL)
            .bind(refund.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_refund(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        refund: RefundUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_REFUND_SQL)
            .bind(refund.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_refunds(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<RefundRecord>, sqlx::Error> {
        query_as::<Postgres, RefundRecord>(LIST_REFUNDS_SQL)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for RefundRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: RefundUuid::from_uuid(row.try_get("uuid")?),
            purchase_uuid: PurchaseUuid::from_uuid(row.try_get("purchase_uuid")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
