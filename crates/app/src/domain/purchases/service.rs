//! Purchases service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        accounts::{records::Caller, repository::PgAccountsRepository},
        products::repository::PgProductsRepository,
        purchases::{
            data::NewPurchase,
            errors::PurchasesServiceError,
            records::PurchaseRecord,
            repository::PgPurchasesRepository,
            rules::{check_purchase, check_quantity},
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgPurchasesService {
    db: Db,
    purchases: PgPurchasesRepository,
    products: PgProductsRepository,
    accounts: PgAccountsRepository,
}

impl PgPurchasesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            purchases: PgPurchasesRepository::new(),
            products: PgProductsRepository::new(),
            accounts: PgAccountsRepository::new(),
        }
    }
}

#[async_trait]
impl PurchasesService for PgPurchasesService {
    async fn purchase(
        &self,
        caller: Caller,
        purchase: NewPurchase,
    ) -> Result<PurchaseRecord, PurchasesServiceError> {
        check_quantity(purchase.quantity)?;

        let mut tx = self.db.begin_transaction().await?;

        let product = self
            .products
            .lock_product(&mut tx, purchase.product_uuid)
            .await?;

        if product.is_deleted() {
            return Err(PurchasesServiceError::NotFound);
        }

        let account = self.accounts.lock_account(&mut tx, caller.account).await?;

        let total = check_purchase(
            purchase.quantity,
            product.stock,
            product.price,
            account.wallet,
        )?;

        if self
            .products
            .decrement_stock(&mut tx, product.uuid, purchase.quantity)
            .await?
            == 0
        {
            return Err(PurchasesServiceError::InsufficientStock);
        }

        if self
            .accounts
            .debit_wallet(&mut tx, account.uuid, total)
            .await?
            == 0
        {
            return Err(PurchasesServiceError::InsufficientFunds);
        }

        let created = self
            .purchases
            .create_purchase(&mut tx, account.uuid, purchase, product.price, total)
            .await?;

        tx.commit().await?;

        info!(
            purchase_uuid = %created.uuid,
            account_uuid = %created.account_uuid,
            product_uuid = %created.product_uuid,
            quantity = created.quantity,
            total = created.total,
            "purchased product"
        );

        Ok(created)
    }

    async fn list_purchases(
        &self,
        caller: Caller,
    ) -> Result<Vec<PurchaseRecord>, PurchasesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let purchases = self
            .purchases
            .list_purchases(&mut tx, caller.account)
            .await?;

        tx.commit().await?;

        Ok(purchases)
    }
}

#[automock]
#[async_trait]
pub trait PurchasesService: Send + Sync {
    /// Buy `quantity` units of a product from the caller's wallet.
    ///
    /// Stock, wallet and ledger change together or not at all.
    async fn purchase(
        &self,
        caller: Caller,
        purchase: NewPurchase,
    ) -> Result<PurchaseRecord, PurchasesServiceError>;

    /// The caller's purchases, newest first.
    async fn list_purchases(
        &self,
        caller: Caller,
    ) -> Result<Vec<PurchaseRecord>, PurchasesServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, Timestamp};
    use testresult::TestResult;

    use crate::{
        domain::{
            products::{ProductsService, records::ProductUuid},
            purchases::records::PurchaseUuid,
        },
        test::{TestContext, helpers},
    };

    use super::*;

    fn new_purchase(product: ProductUuid, quantity: u64) -> NewPurchase {
        NewPurchase {
            uuid: PurchaseUuid::new(),
            product_uuid: product,
            quantity,
            purchased_at: Timestamp::now(),
        }
    }

    #[tokio::test]
    async fn purchase_debits_wallet_and_decrements_stock() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = helpers::create_customer(&ctx, "alice", 100).await?;
        let product = helpers::create_product(&ctx, 10, 5).await?;

        let purchase = ctx
            .purchases
            .purchase(customer, new_purchase(product.uuid, 3))
            .await?;

        assert_eq!(purchase.account_uuid, customer.account);
        assert_eq!(purchase.product_uuid, product.uuid);
        assert_eq!(purchase.quantity, 3);
        assert_eq!(purchase.unit_price, 10);
        assert_eq!(purchase.total, 30);
        assert!(purchase.refund_rejected_at.is_none());

        assert_eq!(helpers::stock(&ctx, product.uuid).await?, 2);
        assert_eq!(helpers::wallet(&ctx, customer.account).await?, 70);
        assert_eq!(ctx.purchases.list_purchases(customer).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn purchase_can_spend_entire_wallet_and_stock() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = helpers::create_customer(&ctx, "alice", 100).await?;
        let product = helpers::create_product(&ctx, 20, 5).await?;

        ctx.purchases
            .purchase(customer, new_purchase(product.uuid, 5))
            .await?;

        assert_eq!(helpers::stock(&ctx, product.uuid).await?, 0);
        assert_eq!(helpers::wallet(&ctx, customer.account).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn purchase_above_stock_returns_insufficient_stock() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = helpers::create_customer(&ctx, "alice", 1_000).await?;
        let product = helpers::create_product(&ctx, 10, 5).await?;

        let result = ctx
            .purchases
            .purchase(customer, new_purchase(product.uuid, 6))
            .await;

        assert!(
            matches!(result, Err(PurchasesServiceError::InsufficientStock)),
            "expected InsufficientStock, got {result:?}"
        );
        assert_eq!(helpers::stock(&ctx, product.uuid).await?, 5);
        assert_eq!(helpers::wallet(&ctx, customer.account).await?, 1_000);
        assert!(ctx.purchases.list_purchases(customer).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn purchase_above_wallet_returns_insufficient_funds() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = helpers::create_customer(&ctx, "alice", 29).await?;
        let product = helpers::create_product(&ctx, 10, 5).await?;

        let result = ctx
            .purchases
            .purchase(customer, new_purchase(product.uuid, 3))
            .await;

        assert!(
            matches!(result, Err(PurchasesServiceError::InsufficientFunds)),
            "expected InsufficientFunds, got {result:?}"
        );
        assert_eq!(helpers::stock(&ctx, product.uuid).await?, 5);
        assert_eq!(helpers::wallet(&ctx, customer.account).await?, 29);
        assert!(ctx.purchases.list_purchases(customer).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn purchase_zero_quantity_returns_invalid_quantity() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = helpers::create_customer(&ctx, "alice", 100).await?;
        let product = helpers::create_product(&ctx, 10, 5).await?;

        let result = ctx
            .purchases
            .purchase(customer, new_purchase(product.uuid, 0))
            .await;

        assert!(
            matches!(result, Err(PurchasesServiceError::InvalidQuantity)),
            "expected InvalidQuantity, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn purchase_unknown_product_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = helpers::create_customer(&ctx, "alice", 100).await?;

        let result = ctx
            .purchases
            .purchase(customer, new_purchase(ProductUuid::new(), 1))
            .await;

        assert!(
            matches!(result, Err(PurchasesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn purchase_deleted_product_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = helpers::create_customer(&ctx, "alice", 100).await?;
        let product = helpers::create_product(&ctx, 10, 5).await?;

        ctx.products.delete_product(ctx.staff, product.uuid).await?;

        let result = ctx
            .purchases
            .purchase(customer, new_purchase(product.uuid, 1))
            .await;

        assert!(
            matches!(result, Err(PurchasesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
        assert_eq!(helpers::wallet(&ctx, customer.account).await?, 100);

        Ok(())
    }

    #[tokio::test]
    async fn purchase_captures_price_at_purchase_time() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = helpers::create_customer(&ctx, "alice", 100).await?;
        let product = helpers::create_product(&ctx, 10, 5).await?;

        let purchase = ctx
            .purchases
            .purchase(customer, new_purchase(product.uuid, 2))
            .await?;

        helpers::set_price(&ctx, product.uuid, 40).await?;

        let listed = ctx.purchases.list_purchases(customer).await?;

        assert_eq!(listed.first().map(|p| p.uuid), Some(purchase.uuid));
        assert_eq!(listed.first().map(|p| p.unit_price), Some(10));
        assert_eq!(listed.first().map(|p| p.total), Some(20));

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_purchases_of_last_unit_let_exactly_one_through() -> TestResult {
        let ctx = TestContext::new().await;
        let alice = helpers::create_customer(&ctx, "alice", 100).await?;
        let bob = helpers::create_customer(&ctx, "bob", 100).await?;
        let product = helpers::create_product(&ctx, 10, 1).await?;

        let (first, second) = tokio::join!(
            ctx.purchases.purchase(alice, new_purchase(product.uuid, 1)),
            ctx.purchases.purchase(bob, new_purchase(product.uuid, 1)),
        );

        let outcomes = [first, second];
        let succeeded = outcomes.iter().filter(|r| r.is_ok()).count();
        let out_of_stock = outcomes
            .iter()
            .filter(|r| matches!(r, Err(PurchasesServiceError::InsufficientStock)))
            .count();

        assert_eq!(succeeded, 1, "exactly one purchase should succeed");
        assert_eq!(out_of_stock, 1, "the other should see no stock");
        assert_eq!(helpers::stock(&ctx, product.uuid).await?, 0);

        let spent = 200 - helpers::wallet(&ctx, alice.account).await?
            - helpers::wallet(&ctx, bob.account).await?;

        assert_eq!(spent, 10, "only one wallet should be debited");

        Ok(())
    }

    #[tokio::test]
    async fn list_purchases_is_newest_first_and_scoped_to_caller() -> TestResult {
        let ctx = TestContext::new().await;
        let alice = helpers::create_customer(&ctx, "alice", 100).await?;
        let bob = helpers::create_customer(&ctx, "bob", 100).await?;
        let product = helpers::create_product(&ctx, 1, 10).await?;
        let earlier = Timestamp::now() - SignedDuration::from_secs(60);

        let older = ctx
            .purchases
            .purchase(
                alice,
                NewPurchase {
                    purchased_at: earlier,
                    ..new_purchase(product.uuid, 1)
                },
            )
            .await?;
        let newer = ctx
            .purchases
            .purchase(alice, new_purchase(product.uuid, 1))
            .await?;

        ctx.purchases
            .purchase(bob, new_purchase(product.uuid, 1))
            .await?;

        let uuids: Vec<PurchaseUuid> = ctx
            .purchases
            .list_purchases(alice)
            .await?
            .iter()
            .map(|p| p.uuid)
            .collect();

        assert_eq!(uuids, vec![newer.uuid, older.uuid]);

        Ok(())
    }
}
