//! Purchases Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::{to_signed, try_get_unsigned},
    domain::{
        accounts::records::AccountUuid,
        products::records::ProductUuid,
        purchases::{
            data::NewPurchase,
            records::{PurchaseRecord, PurchaseUuid},
        },
    },
};

const CREATE_PURCHASE_SQL: &str = include_str!("sql/create_purchase.sql");
const LIST_PURCHASES_SQL: &str = include_str!("sql/list_purchases.sql");
const LOCK_PURCHASE_SQL: &str = include_str!("sql/lock_purchase.sql");
const DELETE_PURCHASE_SQL: &str = include_str!("sql/delete_purchase.sql");
const MARK_REFUND_REJECTED_SQL: &str = include_str!("sql/mark_refund_rejected.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPurchasesRepository;

impl PgPurchasesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_purchase(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
        purchase: NewPurchase,
        unit_price: u64,
        total: u64,
    ) -> Result<PurchaseRecord, sqlx::Error> {
        query_as::<Postgres, PurchaseRecord>(CREATE_PURCHASE_SQL)
            .bind(purchase.uuid.into_uuid())
            .bind(account.into_uuid())
            .bind(purchase.product_uuid.into_uuid())
            .bind(to_signed("quantity", purchase.quantity)?)
            .bind(to_signed("unit_price", unit_price)?)
            .bind(to_signed("total", total)?)
            .bind(SqlxTimestamp::from(purchase.purchased_at))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_purchases(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
    ) -> Result<Vec<PurchaseRecord>, sqlx::Error> {
        query_as::<Postgres, PurchaseRecord>(LIST_PURCHASES_SQL)
            .bind(account.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn lock_purchase(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        purchase: PurchaseUuid,
    ) -> Result<PurchaseRecord, sqlx::Error> {
        query_as::<Postgres, PurchaseRecord>(LOCK_PURCHASE_SQL)
            .bind(purchase.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_purchase(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        purchase: PurchaseUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PURCHASE_SQL)
            .bind(purchase.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn mark_refund_rejected(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        purchase: PurchaseUuid,
        rejected_at: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(MARK_REFUND_REJECTED_SQL)
            .bind(purchase.into_uuid())
            .bind(SqlxTimestamp::from(rejected_at))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for PurchaseRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: PurchaseUuid::from_uuid(row.try_get("uuid")?),
            account_uuid: AccountUuid::from_uuid(row.try_get("account_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            quantity: try_get_unsigned(row, "quantity")?,
            unit_price: try_get_unsigned(row, "unit_price")?,
            total: try_get_unsigned(row, "total")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            refund_rejected_at: row
                .try_get::<Option<SqlxTimestamp>, _>("refund_rejected_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
