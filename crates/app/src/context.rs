//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        accounts::{AccountsService, DEFAULT_WALLET, PgAccountsService},
        products::{PgProductsService, ProductsService},
        purchases::{PgPurchasesService, PurchasesService},
        refunds::{PgRefundsService, RefundsService, policy::RefundPolicy},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),
}

/// Store-wide settings the services are built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppSettings {
    pub refund_policy: RefundPolicy,

    /// Wallet balance given to newly registered accounts, in minor units.
    pub default_wallet: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            refund_policy: RefundPolicy::default(),
            default_wallet: DEFAULT_WALLET,
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub accounts: Arc<dyn AccountsService>,
    pub products: Arc<dyn ProductsService>,
    pub purchases: Arc<dyn PurchasesService>,
    pub refunds: Arc<dyn RefundsService>,
}

impl AppContext {
    #[must_use]
    pub fn new(db: Db, settings: AppSettings) -> Self {
        Self {
            accounts: Arc::new(PgAccountsService::new(db.clone(), settings.default_wallet)),
            products: Arc::new(PgProductsService::new(db.clone())),
            purchases: Arc::new(PgPurchasesService::new(db.clone())),
            refunds: Arc::new(PgRefundsService::new(db, settings.refund_policy)),
        }
    }

    /// Build application context from a database URL, optionally applying
    /// pending migrations first.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or applying
    /// migrations fails.
    pub async fn from_database_url(
        url: &str,
        settings: AppSettings,
        run_migrations: bool,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        if run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrate)?;
        }

        Ok(Self::new(Db::new(pool), settings))
    }
}
