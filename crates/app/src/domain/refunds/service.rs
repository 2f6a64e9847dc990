//! Refunds service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        accounts::{records::Caller, repository::PgAccountsRepository},
        products::repository::PgProductsRepository,
        purchases::repository::PgPurchasesRepository,
        refunds::{
            data::{NewRefund, RefundDecision},
            errors::RefundsServiceError,
            policy::RefundPolicy,
            records::{RefundRecord, RefundUuid},
            repository::PgRefundsRepository,
            rules::{check_refund_window, check_resubmission},
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgRefundsService {
    db: Db,
    policy: RefundPolicy,
    refunds: PgRefundsRepository,
    purchases: PgPurchasesRepository,
    products: PgProductsRepository,
    accounts: PgAccountsRepository,
}

impl PgRefundsService {
    #[must_use]
    pub fn new(db: Db, policy: RefundPolicy) -> Self {
        Self {
            db,
            policy,
            refunds: PgRefundsRepository::new(),
            purchases: PgPurchasesRepository::new(),
            products: PgProductsRepository::new(),
            accounts: PgAccountsRepository::new(),
        }
    }
}

#[async_trait]
impl RefundsService for PgRefundsService {
    async fn request_refund(
        &self,
        caller: Caller,
        refund: NewRefund,
    ) -> Result<RefundRecord, RefundsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let purchase = self
            .purchases
            .lock_purchase(&mut tx, refund.purchase_uuid)
            .await?;

        if purchase.account_uuid != caller.account {
            return Err(RefundsServiceError::NotFound);
        }

        if self
            .refunds
            .find_refund_by_purchase(&mut tx, purchase.uuid)
            .await?
            .is_some()
        {
            return Err(RefundsServiceError::DuplicateRefund);
        }

        check_resubmission(self.policy.resubmission, purchase.refund_rejected_at)?;
        check_refund_window(purchase.created_at, refund.requested_at, self.policy.window)?;

        let created = self.refunds.create_refund(&mut tx, refund).await?;

        tx.commit().await?;

        info!(
            refund_uuid = %created.uuid,
            purchase_uuid = %created.purchase_uuid,
            account_uuid = %caller.account,
            "requested refund"
        );

        Ok(created)
    }

    async fn resolve_refund(
        &self,
        caller: Caller,
        refund: RefundUuid,
        decision: RefundDecision,
    ) -> Result<(), RefundsServiceError> {
        caller.require_staff()?;

        let mut tx = self.db.begin_transaction().await?;

        let refund = self.refunds.lock_refund(&mut tx, refund).await?;

        let purchase = self
            .purchases
            .lock_purchase(&mut tx, refund.purchase_uuid)
            .await?;

        match decision {
            RefundDecision::Approve => {
                // The product row may be soft-deleted; stock still returns to it.
                let product = self
                    .products
                    .lock_product(&mut tx, purchase.product_uuid)
                    .await?;

                let account = self
                    .accounts
                    .lock_account(&mut tx, purchase.account_uuid)
                    .await?;

                self.products
                    .increment_stock(&mut tx, product.uuid, purchase.quantity)
                    .await?;

                self.accounts
                    .credit_wallet(&mut tx, account.uuid, purchase.total)
                    .await?;

                self.refunds.delete_refund(&mut tx, refund.uuid).await?;
                self.purchases.delete_purchase(&mut tx, purchase.uuid).await?;
            }
            RefundDecision::Reject => {
                self.refunds.delete_refund(&mut tx, refund.uuid).await?;

                self.purchases
                    .mark_refund_rejected(&mut tx, purchase.uuid, Timestamp::now())
                    .await?;
            }
        }

        tx.commit().await?;

        info!(
            refund_uuid = %refund.uuid,
            purchase_uuid = %purchase.uuid,
            staff_uuid = %caller.account,
            ?decision,
            "resolved refund"
        );

        Ok(())
    }

    async fn list_refunds(&self, caller: Caller) -> Result<Vec<RefundRecord>, RefundsServiceError> {
        caller.require_staff()?;

        let mut tx = self.db.begin_transaction().await?;

        let refunds = self.refunds.list_refunds(&mut tx).await?;

        tx.commit().await?;

        Ok(refunds)
    }
}

#[automock]
#[async_trait]
pub trait RefundsService: Send + Sync {
    /// Record a pending refund for one of the caller's purchases.
    ///
    /// Purchases owned by other accounts are reported as not found.
    async fn request_refund(
        &self,
        caller: Caller,
        refund: NewRefund,
    ) -> Result<RefundRecord, RefundsServiceError>;

    /// Approve or reject a pending refund. Staff only.
    async fn resolve_refund(
        &self,
        caller: Caller,
        refund: RefundUuid,
        decision: RefundDecision,
    ) -> Result<(), RefundsServiceError>;

    /// All pending refunds, oldest first. Staff only.
    async fn list_refunds(&self, caller: Caller) -> Result<Vec<RefundRecord>, RefundsServiceError>;
}
