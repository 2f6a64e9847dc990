//! Store refund policy.

use clap::ValueEnum;
use jiff::SignedDuration;

/// Default time after a purchase during which a refund may be requested.
pub const DEFAULT_REFUND_WINDOW: SignedDuration = SignedDuration::from_secs(180);

/// Whether a purchase may be refunded again after staff rejected a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum RefundResubmission {
    #[default]
    Allow,
    Deny,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefundPolicy {
    /// Inclusive upper bound on purchase age at request time.
    pub window: SignedDuration,
    pub resubmission: RefundResubmission,
}

impl Default for RefundPolicy {
    fn default() -> Self {
        Self {
            window: DEFAULT_REFUND_WINDOW,
            resubmission: RefundResubmission::default(),
        }
    }
}
