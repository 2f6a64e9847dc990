//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use storefront_app::{
    context::AppContext,
    domain::{
        accounts::{
            MockAccountsService,
            records::{AccountRecord, AccountUuid, Caller},
        },
        products::{
            MockProductsService,
            records::{ProductRecord, ProductUuid},
        },
        purchases::{
            MockPurchasesService,
            records::{PurchaseRecord, PurchaseUuid},
        },
        refunds::{
            MockRefundsService,
            records::{RefundRecord, RefundUuid},
        },
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_ACCOUNT_UUID: AccountUuid = AccountUuid::from_uuid(Uuid::nil());

pub(crate) const TEST_CUSTOMER: Caller = Caller::customer(TEST_ACCOUNT_UUID);

pub(crate) const TEST_STAFF: Caller = Caller::staff(TEST_ACCOUNT_UUID);

#[salvo::handler]
async fn inject_customer(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_caller(TEST_CUSTOMER);
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
async fn inject_staff(req: &mut Request, depot: &mut Depot, res: &mut Response, ctrl: &mut FlowCtrl) {
    depot.insert_caller(TEST_STAFF);
    ctrl.call_next(req, depot, res).await;
}

/// Service mocks behind a test [`State`]. Every mock starts strict.
pub(crate) struct TestState {
    accounts: MockAccountsService,
    products: MockProductsService,
    purchases: MockPurchasesService,
    refunds: MockRefundsService,
}

impl TestState {
    pub(crate) fn new() -> Self {
        Self {
            accounts: strict_accounts_mock(),
            products: strict_products_mock(),
            purchases: strict_purchases_mock(),
            refunds: strict_refunds_mock(),
        }
    }

    pub(crate) fn with_accounts(mut self, accounts: MockAccountsService) -> Self {
        self.accounts = accounts;
        self
    }

    pub(crate) fn with_products(mut self, products: MockProductsService) -> Self {
        self.products = products;
        self
    }

    pub(crate) fn with_purchases(mut self, purchases: MockPurchasesService) -> Self {
        self.purchases = purchases;
        self
    }

    pub(crate) fn with_refunds(mut self, refunds: MockRefundsService) -> Self {
        self.refunds = refunds;
        self
    }

    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            accounts: Arc::new(self.accounts),
            products: Arc::new(self.products),
            purchases: Arc::new(self.purchases),
            refunds: Arc::new(self.refunds),
        })
    }
}

fn strict_accounts_mock() -> MockAccountsService {
    let mut accounts = MockAccountsService::new();

    accounts.expect_register().never();
    accounts.expect_get_account().never();
    accounts.expect_authenticate().never();
    accounts.expect_set_staff().never();

    accounts
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();

    products
}

fn strict_purchases_mock() -> MockPurchasesService {
    let mut purchases = MockPurchasesService::new();

    purchases.expect_purchase().never();
    purchases.expect_list_purchases().never();

    purchases
}

fn strict_refunds_mock() -> MockRefundsService {
    let mut refunds = MockRefundsService::new();

    refunds.expect_request_refund().never();
    refunds.expect_resolve_refund().never();
    refunds.expect_list_refunds().never();

    refunds
}

/// Serve `route` with no authenticated caller.
pub(crate) fn public_service(state: TestState, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state.into_state())).push(route))
}

/// Serve `route` as [`TEST_CUSTOMER`].
pub(crate) fn customer_service(state: TestState, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state.into_state()))
            .hoop(inject_customer)
            .push(route),
    )
}

/// Serve `route` as [`TEST_STAFF`].
pub(crate) fn staff_service(state: TestState, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state.into_state()))
            .hoop(inject_staff)
            .push(route),
    )
}

pub(crate) fn make_account(uuid: AccountUuid) -> AccountRecord {
    AccountRecord {
        uuid,
        username: "alice".to_string(),
        wallet: 1_000_000,
        staff: false,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_product(uuid: ProductUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        name: "Teapot".to_string(),
        description: "Short and stout".to_string(),
        price: 100,
        stock: 5,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_purchase(uuid: PurchaseUuid, product: ProductUuid) -> PurchaseRecord {
    PurchaseRecord {
        uuid,
        account_uuid: TEST_ACCOUNT_UUID,
        product_uuid: product,
        quantity: 3,
        unit_price: 10,
        total: 30,
        created_at: Timestamp::UNIX_EPOCH,
        refund_rejected_at: None,
    }
}

pub(crate) fn make_refund(uuid: RefundUuid, purchase: PurchaseUuid) -> RefundRecord {
    RefundRecord {
        uuid,
        purchase_uuid: purchase,
        created_at: Timestamp::UNIX_EPOCH,
    }
}
