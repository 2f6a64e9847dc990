//! Store Policy Config

use clap::Args;
use jiff::SignedDuration;
use storefront_app::{
    context::AppSettings,
    domain::{
        accounts::DEFAULT_WALLET,
        refunds::policy::{RefundPolicy, RefundResubmission},
    },
};

/// Wallet and refund policy settings.
#[derive(Debug, Args)]
pub struct StoreConfig {
    /// Seconds after a purchase during which a refund may be requested (inclusive)
    #[arg(long, env = "REFUND_WINDOW_SECONDS", default_value_t = 180_u32)]
    pub refund_window_seconds: u32,

    /// Whether a purchase may be refunded again after a rejection (allow, deny)
    #[arg(
        long,
        env = "REFUND_RESUBMISSION",
        value_enum,
        default_value = "allow"
    )]
    pub refund_resubmission: RefundResubmission,

    /// Starting wallet balance for new accounts, in minor currency units
    #[arg(long, env = "DEFAULT_WALLET", default_value_t = DEFAULT_WALLET)]
    pub default_wallet: u64,
}

impl StoreConfig {
    /// Settings the application services are built with.
    #[must_use]
    pub fn app_settings(&self) -> AppSettings {
        AppSettings {
            refund_policy: RefundPolicy {
                window: SignedDuration::from_secs(i64::from(self.refund_window_seconds)),
                resubmission: self.refund_resubmission,
            },
            default_wallet: self.default_wallet,
        }
    }
}
