//! Test Helpers

use jiff::Timestamp;
use sqlx::query;

use crate::{
    auth::issue_api_token,
    database::{to_signed, try_get_unsigned},
    domain::{
        accounts::{
            AccountsService, AccountsServiceError,
            data::NewAccount,
            records::{AccountUuid, Caller},
        },
        products::{
            ProductsService, ProductsServiceError,
            data::NewProduct,
            records::{ProductRecord, ProductUuid},
        },
        purchases::{
            PurchasesService, PurchasesServiceError,
            data::NewPurchase,
            records::{PurchaseRecord, PurchaseUuid},
        },
    },
    test::TestContext,
};

/// Register a customer and set their wallet to `wallet`.
pub(crate) async fn create_customer(
    ctx: &TestContext,
    username: &str,
    wallet: u64,
) -> Result<Caller, AccountsServiceError> {
    let uuid = AccountUuid::new();

    let account = ctx
        .accounts
        .register(NewAccount {
            uuid,
            username: username.to_string(),
            token_hash: issue_api_token(uuid).token_hash,
            staff: false,
        })
        .await?;

    query("UPDATE accounts SET wallet = $2 WHERE uuid = $1")
        .bind(uuid.into_uuid())
        .bind(to_signed("wallet", wallet)?)
        .execute(ctx.db.pool())
        .await?;

    Ok(Caller::from(&account))
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    price: u64,
    stock: u64,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products
        .create_product(
            ctx.staff,
            NewProduct {
                uuid: ProductUuid::new(),
                name: "Widget".to_string(),
                description: String::new(),
                price,
                stock,
            },
        )
        .await
}

pub(crate) async fn purchase(
    ctx: &TestContext,
    caller: Caller,
    product: ProductUuid,
    quantity: u64,
    purchased_at: Timestamp,
) -> Result<PurchaseRecord, PurchasesServiceError> {
    ctx.purchases
        .purchase(
            caller,
            NewPurchase {
                uuid: PurchaseUuid::new(),
                product_uuid: product,
                quantity,
                purchased_at,
            },
        )
        .await
}

/// Reprice a product behind the service's back.
pub(crate) async fn set_price(
    ctx: &TestContext,
    product: ProductUuid,
    price: u64,
) -> Result<(), sqlx::Error> {
    query("UPDATE products SET price = $2 WHERE uuid = $1")
        .bind(product.into_uuid())
        .bind(to_signed("price", price)?)
        .execute(ctx.db.pool())
        .await?;

    Ok(())
}

/// Current stock, including products that have been deleted.
pub(crate) async fn stock(ctx: &TestContext, product: ProductUuid) -> Result<u64, sqlx::Error> {
    let row = query("SELECT stock FROM products WHERE uuid = $1")
        .bind(product.into_uuid())
        .fetch_one(ctx.db.pool())
        .await?;

    try_get_unsigned(&row, "stock")
}

pub(crate) async fn wallet(ctx: &TestContext, account: AccountUuid) -> Result<u64, sqlx::Error> {
    let row = query("SELECT wallet FROM accounts WHERE uuid = $1")
        .bind(account.into_uuid())
        .fetch_one(ctx.db.pool())
        .await?;

    try_get_unsigned(&row, "wallet")
}
